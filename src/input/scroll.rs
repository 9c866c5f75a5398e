use crate::scene::model::Scene;

// The sprite travels a 100-unit span starting 50 units off-center, with its
// height pinned; direction decides which edge it travels from.
const TRAVEL_EDGE: f64 = 50.0;
const TRAVEL_SPAN: f64 = 100.0;
const SPRITE_Y: f64 = 16.0;

/// Maps the host's scroll position onto the video sprite transform.
///
/// Purely event-driven; there is no polling and no smoothing — the sprite
/// jumps straight to the computed position on every event. A change in
/// scroll direction mirrors the sprite horizontally, exactly once per sign
/// change.
#[derive(Clone, Copy, Debug)]
pub struct ScrollMapper {
    last_offset: f64,
    direction: i8,
}

impl Default for ScrollMapper {
    fn default() -> Self {
        Self {
            last_offset: 0.0,
            direction: 1,
        }
    }
}

impl ScrollMapper {
    /// Fresh mapper assuming a page scrolled to the top, moving down.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current travel direction: `+1` down-page, `-1` up-page.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Scroll fraction in `[0, 1]`, degenerate-safe: a page with no
    /// scrollable height maps to 0 instead of dividing by zero.
    pub fn scroll_fraction(offset: f64, scrollable_height: f64) -> f64 {
        if scrollable_height <= 0.0 {
            return 0.0;
        }
        (offset / scrollable_height).clamp(0.0, 1.0)
    }

    /// Handle one scroll event.
    ///
    /// A no-op until the video sprite exists. Otherwise: track direction,
    /// mirror on sign change, and place the sprite as a linear function of
    /// the scroll fraction.
    pub fn on_scroll(&mut self, scene: &mut Scene, offset: f64, scrollable_height: f64) {
        let Some(sprite) = scene.video_sprite.as_mut() else {
            return;
        };

        let fraction = Self::scroll_fraction(offset, scrollable_height);

        // A zero delta has no sign and keeps the current direction.
        let new_direction: i8 = if offset > self.last_offset {
            1
        } else if offset < self.last_offset {
            -1
        } else {
            self.direction
        };
        if new_direction != self.direction {
            self.direction = new_direction;
            sprite.set_mirrored(new_direction < 0);
        }
        self.last_offset = offset;

        sprite.position.x = if self.direction > 0 {
            TRAVEL_EDGE - fraction * TRAVEL_SPAN
        } else {
            -TRAVEL_EDGE + fraction * TRAVEL_SPAN
        };
        sprite.position.y = SPRITE_Y;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/scroll.rs"]
mod tests;
