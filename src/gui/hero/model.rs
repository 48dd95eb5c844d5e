use super::{
    ENTRANCE_DELAY_SECS, ENTRANCE_ROTATE, ENTRANCE_SCALE, ENTRANCE_SECS, ENTRANCE_Y,
    FLOAT_DELAY_SECS, FLOAT_ROTATE, FLOAT_SECS, FLOAT_Y, FOLLOW_ROTATION, FOLLOW_SECS, FOLLOW_X,
    FOLLOW_Y, MAX_POINTER_SPEED, MAX_STRETCH, SKEW, STRETCH_SECS,
};
use crate::gui::geometry::{Point, Size};
use crate::gui::stage::{Prop, Target};
use glide::{AnimationId, Ease, QuickTo, Repeat, Timeline, Tween, Tweener};
use std::time::Duration;

/// Rest values of the channels the pointer follow drives.
const FOLLOW_REST: [(Target, Prop, f64); 7] = [
    (Target::HeroTilt, Prop::X, 0.0),
    (Target::HeroTilt, Prop::Y, 0.0),
    (Target::HeroTilt, Prop::RotateY, 0.0),
    (Target::HeroTilt, Prop::RotateX, 0.0),
    (Target::HeroImage, Prop::ScaleX, 1.0),
    (Target::HeroImage, Prop::ScaleY, 1.0),
    (Target::HeroImage, Prop::Skew, 0.0),
];

/// Every transform applied to the hero portrait, outermost first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroTransform {
    pub opacity: f64,
    pub float_y: f64,
    pub scale: f64,
    pub rotate: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew: f64,
}

/// Banner portrait motion: a one-shot entrance, an idle float and a
/// pointer-follow tilt with a speed-dependent stretch.
#[derive(Debug)]
pub struct Hero {
    reduced_motion: bool,
    size: Size,
    last_pointer: Option<Point>,
    entrance: Option<AnimationId>,
    float: Option<AnimationId>,
}

impl Hero {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            size: Size::default(),
            last_pointer: None,
            entrance: None,
            float: None,
        }
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn has_started(&self) -> bool {
        self.entrance.is_some()
    }

    pub fn is_floating(&self) -> bool {
        self.float.is_some()
    }

    /// Starts the entrance, and the idle float unless motion is reduced.
    /// Only the first call does anything.
    pub fn start<A: Tweener<Target, Prop>>(&mut self, anim: &mut A) -> bool {
        if self.entrance.is_some() {
            return false;
        }
        for (target, prop, rest) in FOLLOW_REST {
            anim.set(target, prop, rest);
        }

        let delay = Duration::from_secs_f64(ENTRANCE_DELAY_SECS);
        let entrance = [
            (Prop::Opacity, 0.0, 1.0),
            (Prop::Y, ENTRANCE_Y, 0.0),
            (Prop::Scale, ENTRANCE_SCALE, 1.0),
            (Prop::Rotate, ENTRANCE_ROTATE, 0.0),
        ]
        .into_iter()
        .fold(Timeline::new(), |tl, (prop, from, to)| {
            tl.at_secs(
                0.0,
                Tween::from_to(Target::HeroFloat, prop, from, to)
                    .secs(ENTRANCE_SECS)
                    .delay(delay)
                    .ease(Ease::Power3Out),
            )
        });
        self.entrance = Some(anim.play(entrance));

        if !self.reduced_motion {
            self.start_float(anim);
        }
        true
    }

    fn start_float<A: Tweener<Target, Prop>>(&mut self, anim: &mut A) {
        let delay = Duration::from_secs_f64(FLOAT_DELAY_SECS);
        let float = [(Prop::Y, FLOAT_Y), (Prop::Rotate, FLOAT_ROTATE)]
            .into_iter()
            .fold(Timeline::new(), |tl, (prop, value)| {
                tl.at_secs(
                    0.0,
                    Tween::to(Target::HeroFloat, prop, value)
                        .secs(FLOAT_SECS)
                        .delay(delay)
                        .ease(Ease::SineInOut)
                        .repeat(Repeat::Forever)
                        .yoyo(true),
                )
            });
        self.float = Some(anim.play(float));
    }

    /// Switching reduced motion on drops the float and the follow and puts
    /// the portrait at rest. Switching it off restarts the float.
    pub fn set_reduced_motion<A: Tweener<Target, Prop>>(&mut self, reduce: bool, anim: &mut A) {
        if self.reduced_motion == reduce {
            return;
        }
        self.reduced_motion = reduce;
        log::info!("Reduced motion: {}", reduce);
        if !self.has_started() {
            return;
        }

        if reduce {
            for target in [Target::HeroFloat, Target::HeroTilt, Target::HeroImage] {
                anim.kill_tweens_of(target);
            }
            for (prop, value) in [
                (Prop::Opacity, 1.0),
                (Prop::Y, 0.0),
                (Prop::Scale, 1.0),
                (Prop::Rotate, 0.0),
            ] {
                anim.set(Target::HeroFloat, prop, value);
            }
            for (target, prop, rest) in FOLLOW_REST {
                anim.set(target, prop, rest);
            }
            self.float = None;
            self.last_pointer = None;
        } else {
            self.start_float(anim);
        }
    }

    fn quick(target: Target, prop: Prop, secs: f64) -> QuickTo<Target, Prop> {
        QuickTo::new(target, prop, Duration::from_secs_f64(secs), Ease::Power3Out)
    }

    /// Pointer position normalized to `[-0.5, 0.5]` on both axes.
    pub fn normalize(&self, point: Point) -> Option<(f64, f64)> {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return None;
        }
        Some((
            (point.x / self.size.width - 0.5).clamp(-0.5, 0.5),
            (point.y / self.size.height - 0.5).clamp(-0.5, 0.5),
        ))
    }

    /// Retargets the follow channels. Returns false when the follow is off.
    pub fn pointer_move<A: Tweener<Target, Prop>>(&mut self, point: Point, anim: &mut A) -> bool {
        if self.reduced_motion {
            return false;
        }
        let Some((nx, ny)) = self.normalize(point) else {
            return false;
        };

        let speed = self
            .last_pointer
            .map(|last| (point.x - last.x).hypot(point.y - last.y))
            .unwrap_or(0.0)
            .min(MAX_POINTER_SPEED);
        self.last_pointer = Some(point);
        let stretch = speed / MAX_POINTER_SPEED * MAX_STRETCH;

        let follow = [
            (Target::HeroTilt, Prop::X, nx * FOLLOW_X, FOLLOW_SECS),
            (Target::HeroTilt, Prop::Y, ny * FOLLOW_Y, FOLLOW_SECS),
            (Target::HeroTilt, Prop::RotateY, nx * FOLLOW_ROTATION, FOLLOW_SECS),
            (Target::HeroTilt, Prop::RotateX, -ny * FOLLOW_ROTATION, FOLLOW_SECS),
            (Target::HeroImage, Prop::ScaleX, 1.0 + stretch, STRETCH_SECS),
            (Target::HeroImage, Prop::ScaleY, 1.0 - stretch, STRETCH_SECS),
            (Target::HeroImage, Prop::Skew, nx * SKEW, STRETCH_SECS),
        ];
        for (target, prop, value, secs) in follow {
            anim.quick_to(&Self::quick(target, prop, secs), value);
        }
        true
    }

    /// Eases every follow channel back to rest.
    pub fn pointer_leave<A: Tweener<Target, Prop>>(&mut self, anim: &mut A) -> bool {
        self.last_pointer = None;
        if self.reduced_motion {
            return false;
        }
        for (target, prop, rest) in FOLLOW_REST {
            let secs = if target == Target::HeroTilt {
                FOLLOW_SECS
            } else {
                STRETCH_SECS
            };
            anim.quick_to(&Self::quick(target, prop, secs), rest);
        }
        true
    }

    pub fn transform<A: Tweener<Target, Prop>>(&self, anim: &A) -> HeroTransform {
        let float = |prop, default| anim.value_or(Target::HeroFloat, prop, default);
        let tilt = |prop| anim.value_or(Target::HeroTilt, prop, 0.0);
        let image = |prop, default| anim.value_or(Target::HeroImage, prop, default);
        HeroTransform {
            opacity: float(Prop::Opacity, 0.0),
            float_y: float(Prop::Y, ENTRANCE_Y),
            scale: float(Prop::Scale, ENTRANCE_SCALE),
            rotate: float(Prop::Rotate, ENTRANCE_ROTATE),
            tilt_x: tilt(Prop::X),
            tilt_y: tilt(Prop::Y),
            rotate_x: tilt(Prop::RotateX),
            rotate_y: tilt(Prop::RotateY),
            scale_x: image(Prop::ScaleX, 1.0),
            scale_y: image(Prop::ScaleY, 1.0),
            skew: image(Prop::Skew, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::stage::Motion;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn hero(reduced: bool) -> Hero {
        let mut h = Hero::new(reduced);
        h.resize(Size::new(1000.0, 600.0));
        h
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_entrance_hidden_until_delay() {
        let mut anim = Motion::new();
        let mut h = hero(true);
        assert!(h.start(&mut anim));
        assert!(!h.start(&mut anim));

        let t = h.transform(&anim);
        assert_eq!(t.opacity, 0.0);
        assert_eq!(t.float_y, ENTRANCE_Y);
        assert_eq!(t.scale, ENTRANCE_SCALE);
        assert_eq!(t.rotate, ENTRANCE_ROTATE);

        anim.tick(ms(0));
        anim.tick(ms(500));
        assert_eq!(h.transform(&anim).opacity, 0.0);

        anim.tick(ms(1200));
        let t = h.transform(&anim);
        assert!(t.opacity > 0.0 && t.opacity < 1.0);

        anim.tick(ms(1800));
        let t = h.transform(&anim);
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.float_y, 0.0);
        assert_eq!(t.scale, 1.0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_float_keeps_running() {
        let mut anim = Motion::new();
        let mut h = hero(false);
        h.start(&mut anim);
        anim.tick(ms(0));
        // first yoyo peak: float starts at 1.6 s, reaches the top 3.6 s later
        anim.tick(ms(5200));
        let t = h.transform(&anim);
        assert!(close(t.float_y, FLOAT_Y));
        assert!(close(t.rotate, FLOAT_ROTATE));

        assert!(anim.tick(ms(60_000)).is_empty());
        assert!(anim.is_animating());
    }

    #[test]
    fn test_follow_targets() {
        let mut anim = Motion::new();
        let mut h = hero(false);
        h.start(&mut anim);

        // nx = 0.4, ny = -0.25
        assert!(h.pointer_move(Point::new(900.0, 150.0), &mut anim));
        anim.tick(ms(0));
        anim.tick(ms(2000));
        let t = h.transform(&anim);
        assert!(close(t.tilt_x, 0.4 * 34.0));
        assert!(close(t.tilt_y, -0.25 * 22.0));
        assert!(close(t.rotate_y, 4.0));
        assert!(close(t.rotate_x, 2.5));
        assert!(close(t.skew, 0.4 * 6.0));
        // first sample has no speed
        assert!(close(t.scale_x, 1.0));
        assert!(close(t.scale_y, 1.0));
    }

    #[test]
    fn test_stretch_scales_with_speed() {
        let mut anim = Motion::new();
        let mut h = hero(false);
        h.pointer_move(Point::new(500.0, 300.0), &mut anim);
        h.pointer_move(Point::new(515.0, 320.0), &mut anim);
        anim.tick(ms(0));
        anim.tick(ms(1000));
        let t = h.transform(&anim);
        // |d| = 25 -> half of the maximum stretch
        assert!(close(t.scale_x, 1.05));
        assert!(close(t.scale_y, 0.95));

        h.pointer_move(Point::new(900.0, 320.0), &mut anim);
        anim.tick(ms(1100));
        anim.tick(ms(3000));
        let t = h.transform(&anim);
        assert!(close(t.scale_x, 1.1));
        assert!(close(t.scale_y, 0.9));
    }

    #[test]
    fn test_leave_returns_to_rest() {
        let mut anim = Motion::new();
        let mut h = hero(false);
        h.pointer_move(Point::new(0.0, 0.0), &mut anim);
        h.pointer_move(Point::new(40.0, 30.0), &mut anim);
        anim.tick(ms(0));
        anim.tick(ms(300));
        assert!(h.transform(&anim).tilt_x != 0.0);

        assert!(h.pointer_leave(&mut anim));
        anim.tick(ms(400));
        anim.tick(ms(2000));
        let t = h.transform(&anim);
        for value in [t.tilt_x, t.tilt_y, t.rotate_x, t.rotate_y, t.skew] {
            assert!(close(value, 0.0));
        }
        assert!(close(t.scale_x, 1.0));
        assert!(close(t.scale_y, 1.0));
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_reduced_motion_skips_float_and_follow() {
        let mut anim = Motion::new();
        let mut h = hero(true);
        h.start(&mut anim);
        assert!(!h.pointer_move(Point::new(900.0, 150.0), &mut anim));
        assert!(!h.pointer_leave(&mut anim));
        anim.tick(ms(0));
        assert!(anim.tick(ms(2000)).len() == 1);
        assert!(!anim.is_animating());
        assert_eq!(h.transform(&anim).tilt_x, 0.0);
    }

    #[test]
    fn test_toggling_reduced_motion() {
        let mut anim = Motion::new();
        let mut h = hero(false);
        h.start(&mut anim);
        h.pointer_move(Point::new(900.0, 150.0), &mut anim);
        anim.tick(ms(0));
        anim.tick(ms(400));

        assert!(h.is_floating());
        h.set_reduced_motion(true, &mut anim);
        assert!(!h.is_floating());
        assert!(!anim.is_animating());
        let t = h.transform(&anim);
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.float_y, 0.0);
        assert_eq!(t.tilt_x, 0.0);

        h.set_reduced_motion(false, &mut anim);
        assert!(h.is_floating());
        assert!(anim.is_animating());
    }

    #[test]
    fn test_zero_size_ignores_pointer() {
        let mut anim = Motion::new();
        let mut h = Hero::new(false);
        assert_eq!(h.normalize(Point::new(1.0, 1.0)), None);
        assert!(!h.pointer_move(Point::new(1.0, 1.0), &mut anim));
    }
}
