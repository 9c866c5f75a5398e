use kurbo::Rect;

/// One element observed for first viewport intersection.
#[derive(Clone, Debug)]
pub struct RevealTarget {
    /// Host-side element identifier.
    pub id: String,
    /// Element bounds in page coordinates.
    pub bounds: Rect,
    shown: bool,
}

/// One-shot viewport-intersection marking.
///
/// The host registers tagged elements; on the first update where an element
/// intersects the viewport it is marked shown and reported back once.
/// There is no un-show.
#[derive(Clone, Debug, Default)]
pub struct RevealObserver {
    targets: Vec<RevealTarget>,
}

impl RevealObserver {
    /// Empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element for observation.
    pub fn observe(&mut self, id: impl Into<String>, bounds: Rect) {
        self.targets.push(RevealTarget {
            id: id.into(),
            bounds,
            shown: false,
        });
    }

    /// Whether an element has been marked shown.
    pub fn is_shown(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t.id == id && t.shown)
    }

    /// Intersect all targets against the viewport; returns the ids newly
    /// shown by this update, in registration order.
    pub fn update(&mut self, viewport: Rect) -> Vec<String> {
        let mut newly_shown = Vec::new();
        for target in &mut self.targets {
            if !target.shown && intersects(target.bounds, viewport) {
                target.shown = true;
                newly_shown.push(target.id.clone());
            }
        }
        newly_shown
    }
}

fn intersects(a: Rect, b: Rect) -> bool {
    let i = a.intersect(b);
    i.width() > 0.0 && i.height() > 0.0
}
