//! Reference geometry of the site's pages, for simulating them without a browser.

use crate::foundation::core::{Rect, Viewport};
use crate::page::spec::ViewSpec;
use crate::viewport::geometry::{ElementBox, StaticLayout};

const NAV_HEIGHT: f64 = 96.0;
const GAP: f64 = 32.0;

/// Height of a view's region. Views without a region (the nav) take no space.
fn region_height(view: &str, viewport: Viewport) -> Option<f64> {
    let h = viewport.height;
    Some(match view {
        "hero" | "philosophy" | "testimonials" => h,
        "featured-work" => 1600.0,
        "process" => 1200.0,
        "services" => 1400.0,
        "contact" | "footer" => h / 2.0,
        _ => return None,
    })
}

struct Region<'a> {
    layout: &'a mut StaticLayout,
    top: f64,
    width: f64,
    height: f64,
}

impl Region<'_> {
    fn margin(&self) -> f64 {
        self.width * 0.08
    }

    fn place(&mut self, id: impl Into<String>, x0: f64, y0: f64, x1: f64, y1: f64) {
        let rect = Rect::new(x0, self.top + y0, x1, self.top + y1);
        self.layout.insert(id, ElementBox::flow(rect));
    }

    /// Equal columns between the page margins.
    fn row(&mut self, ids: &[String], y0: f64, y1: f64) {
        let margin = self.margin();
        let n = ids.len() as f64;
        let col = (self.width - 2.0 * margin - GAP * (n - 1.0)) / n;
        for (i, id) in ids.iter().enumerate() {
            let x0 = margin + i as f64 * (col + GAP);
            self.place(id.as_str(), x0, y0, x0 + col, y1);
        }
    }

    fn children(&mut self, view: &str) {
        let (w, h, m) = (self.width, self.height, self.margin());
        let ids = |prefix: &str, n: usize| {
            (1..=n)
                .map(|i| format!("{prefix}-{i}"))
                .collect::<Vec<_>>()
        };
        match view {
            "featured-work" => {
                self.place("work-title", m, 128.0, w - m, 320.0);
                self.place("work-cards", m, 420.0, w - m, 1020.0);
                self.row(&ids("work-card", 3), 420.0, 1020.0);
                self.place("work-cta", w / 2.0 - 100.0, 1200.0, w / 2.0 + 100.0, 1260.0);
            }
            "philosophy" => {
                self.place("philosophy-text", w * 0.2, h * 0.35, w * 0.8, h * 0.6);
                for id in ids("philosophy-box", 2) {
                    let (cx, cy) = (w / 2.0, h / 2.0);
                    self.place(id, cx - 200.0, cy - 150.0, cx + 200.0, cy + 150.0);
                }
            }
            "process" => {
                let cards = ids("process-card", 4);
                self.row(&cards[..2], 240.0, 680.0);
                self.row(&cards[2..], 712.0, 1152.0);
            }
            "services" => {
                self.place("services-title", m, 128.0, w - m, 320.0);
                self.place("services-cta", m, 1200.0, m + 240.0, 1260.0);
            }
            "testimonials" => self.row(&ids("testimonial", 3), h * 0.3, h * 0.8),
            "footer" => self.place("footer-block", 40.0, 40.0, w - 40.0, h - 40.0),
            _ => {}
        }
    }
}

fn nav(layout: &mut StaticLayout, width: f64) {
    let fixed = |x0, x1| ElementBox::fixed(Rect::new(x0, 16.0, x1, NAV_HEIGHT - 16.0));
    layout.insert("nav", ElementBox::fixed(Rect::new(0.0, 0.0, width, NAV_HEIGHT)));
    layout.insert("nav-brand", fixed(24.0, 224.0));
    layout.insert("nav-links", fixed(width / 2.0 - 200.0, width / 2.0 + 200.0));
    layout.insert("nav-cta", fixed(width - 88.0, width - 24.0));
}

/// Stack the regions of `views` top to bottom and place their inner elements.
pub fn layout(views: &[ViewSpec], viewport: Viewport) -> StaticLayout {
    let mut layout = StaticLayout::new();
    let mut top = 0.0;
    for view in views {
        if view.name == "nav" {
            nav(&mut layout, viewport.width);
            continue;
        }
        let Some(height) = region_height(&view.name, viewport) else {
            continue;
        };
        let mut region = Region {
            layout: &mut layout,
            top,
            width: viewport.width,
            height,
        };
        region.place(view.name.as_str(), 0.0, 0.0, viewport.width, height);
        region.children(&view.name);
        top += height;
    }
    layout
}
