use raylib::prelude::*;

pub type Easing = fn(f32, f32, f32, f32) -> f32;

/// A value animated towards a target.
///
/// Starting a new animation supersedes the running one and continues from the
/// current value, so the last write on a property always wins.
pub struct Tweened {
    value: f32,
    target: f32,
    tween: Option<ease::Tween>,
    animation_timer: f32,
    duration: f32,
}

impl Tweened {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            tween: None,
            animation_timer: 0.0,
            duration: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    #[cfg(test)]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn to(&mut self, target: f32, duration: f32, easing: Easing) {
        self.target = target;
        if duration <= 0.0 {
            self.set(target);
            return;
        }
        self.tween = Some(ease::Tween::new(easing, self.value, target, duration));
        self.animation_timer = 0.0;
        self.duration = duration;
    }

    /// Jump to `value`, cancelling any running animation.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.tween = None;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        self.value = tween.apply(dt);

        self.animation_timer += dt;
        if self.animation_timer >= self.duration {
            self.value = self.target;
            self.tween = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_duration() {
        let mut v = Tweened::new(0.0);
        v.to(10.0, 2.0, ease::quad_in_out);
        assert!(v.is_animating());
        for _ in 0..4 {
            v.update(0.5);
        }
        assert_eq!(v.value(), 10.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn eases_through_midpoint() {
        let mut v = Tweened::new(0.0);
        v.to(10.0, 2.0, ease::quad_in_out);
        v.update(1.0);
        assert!((v.value() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut v = Tweened::new(0.0);
        v.to(10.0, 1.0, ease::linear_none);
        v.update(0.5);
        let halfway = v.value();
        v.to(0.0, 1.0, ease::linear_none);
        v.update(0.5);
        assert!((v.value() - halfway * 0.5).abs() < 1e-3);
        assert_eq!(v.target(), 0.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut v = Tweened::new(3.0);
        v.to(7.0, 0.0, ease::linear_none);
        assert_eq!(v.value(), 7.0);
        assert!(!v.is_animating());
    }
}
