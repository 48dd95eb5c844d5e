use crate::config::{CarouselConfig, ProjectConfig, resolve_asset};
use crate::gui::carousel::{
    BLUR_FACTOR, DEFAULT_RADIUS, FRONT_THRESHOLD, MAX_RADIUS, MIN_OPACITY, MIN_RADIUS, MIN_SCALE,
    RADIUS_FACTOR, TILT,
};
use crate::gui::stage::{Prop, Target};
use gdk_pixbuf::Pixbuf;
use glide::{AnimationId, Tween, Tweener};

/// Signed rotation from `current` to `target`, in `(-180, 180]`, landing on
/// the same position modulo a full turn.
pub fn shortest_delta(current: f64, target: f64) -> f64 {
    let d = (target - current).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(&self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

#[derive(Clone)]
pub struct Card {
    pub project: ProjectConfig,
    pub pixbuf: Option<Pixbuf>,
}

impl Card {
    pub fn new(project: ProjectConfig) -> Self {
        let pixbuf = project.image.as_deref().and_then(|path| {
            let path = resolve_asset(path);
            Pixbuf::from_file(&path)
                .map_err(|e| log::debug!("No image for '{}': {}", project.title, e))
                .ok()
        });
        Self { project, pixbuf }
    }

    pub fn without_image(project: ProjectConfig) -> Self {
        Self {
            project,
            pixbuf: None,
        }
    }
}

/// Screen-space placement of one card for the current rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub depth: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Facing rotation in degrees. Cards behind the centre get an extra half
    /// turn so their front face shows.
    pub rotation_y: f64,
    pub blur: f64,
    pub z_index: i32,
    pub interactive: bool,
}

impl CardTransform {
    pub fn compute(index: usize, step: f64, angle: f64, radius: f64) -> Self {
        let a_deg = index as f64 * step + angle;
        let a = a_deg.to_radians();

        let x = a.sin() * radius;
        let z = a.cos() * radius;

        let depth = (z + radius) / (2.0 * radius);
        let behind = z < 0.0;

        Self {
            index,
            x,
            y: (z / radius) * TILT,
            z,
            depth,
            scale: MIN_SCALE + depth * (1.0 - MIN_SCALE),
            opacity: MIN_OPACITY + depth * (1.0 - MIN_OPACITY),
            rotation_y: -a_deg + if behind { 180.0 } else { 0.0 },
            blur: if depth < 0.5 {
                ((0.5 - depth) * BLUR_FACTOR).max(0.0)
            } else {
                0.0
            },
            z_index: (depth * 1000.0).round() as i32,
            interactive: depth > FRONT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_x: f64,
    start_angle: f64,
}

/// Cards on a virtual circle, rotated by dragging or by eased settles.
/// The rotation angle lives in the animator under
/// `(Target::Carousel, Prop::Rotation)`.
pub struct Carousel {
    pub cards: Vec<Card>,
    settings: CarouselConfig,
    radius: f64,
    drag: Option<Drag>,
    rotation: Option<AnimationId>,
    active_index: usize,
}

impl Carousel {
    pub fn new(cards: Vec<Card>, settings: CarouselConfig) -> Self {
        Self {
            cards,
            settings,
            radius: DEFAULT_RADIUS,
            drag: None,
            rotation: None,
            active_index: 0,
        }
    }

    pub fn from_config(projects: &[ProjectConfig], settings: CarouselConfig) -> Self {
        Self::new(projects.iter().cloned().map(Card::new).collect(), settings)
    }

    /// Swaps in new content and settings. The angle is kept but the active
    /// index is re-derived, since the step may have changed.
    pub fn reload<A: Tweener<Target, Prop>>(
        &mut self,
        cards: Vec<Card>,
        settings: CarouselConfig,
        anim: &mut A,
    ) {
        anim.kill_tweens_of(Target::Carousel);
        self.rotation = None;
        self.drag = None;
        self.cards = cards;
        self.settings = settings;
        self.active_index = self.current_index(anim).unwrap_or(0);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn step(&self) -> Option<f64> {
        (!self.cards.is_empty()).then(|| 360.0 / self.cards.len() as f64)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle<A: Tweener<Target, Prop>>(&self, anim: &A) -> f64 {
        anim.value_or(Target::Carousel, Prop::Rotation, 0.0)
    }

    /// Last index published by a finished rotation.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }

    pub fn current_index<A: Tweener<Target, Prop>>(&self, anim: &A) -> Option<usize> {
        let step = self.step()?;
        let n = self.cards.len() as i64;
        let nearest = (-self.angle(anim) / step).round() as i64;
        Some(nearest.rem_euclid(n) as usize)
    }

    /// Recomputes the radius for a new container width. Only the layout
    /// changes; the rotation angle and any drag in progress are untouched.
    pub fn resize(&mut self, container_width: f64) -> bool {
        let radius = (container_width * RADIUS_FACTOR).clamp(MIN_RADIUS, MAX_RADIUS);
        let changed = (radius - self.radius).abs() > f64::EPSILON;
        self.radius = radius;
        changed
    }

    pub fn layout<A: Tweener<Target, Prop>>(&self, anim: &A) -> Vec<CardTransform> {
        let Some(step) = self.step() else {
            return Vec::new();
        };
        let angle = self.angle(anim);
        (0..self.cards.len())
            .map(|i| CardTransform::compute(i, step, angle, self.radius))
            .collect()
    }

    pub fn front_card<A: Tweener<Target, Prop>>(&self, anim: &A) -> Option<usize> {
        self.layout(anim)
            .into_iter()
            .filter(|t| t.interactive)
            .max_by(|a, b| a.depth.total_cmp(&b.depth))
            .map(|t| t.index)
    }

    /// Rotates the shorter way round so card `index` (any integer, taken
    /// modulo the card count) faces the viewer.
    pub fn go_to_index<A: Tweener<Target, Prop>>(
        &mut self,
        index: i64,
        anim: &mut A,
    ) -> Option<AnimationId> {
        let step = self.step()?;
        let current = self.angle(anim);
        let index = index.rem_euclid(self.cards.len() as i64);
        let target = -(index as f64) * step;
        Some(self.animate_to(current + shortest_delta(current, target), anim))
    }

    pub fn go<A: Tweener<Target, Prop>>(
        &mut self,
        direction: Direction,
        anim: &mut A,
    ) -> Option<AnimationId> {
        let current = self.current_index(anim)? as i64;
        let n = self.cards.len() as i64;
        let next = (current + direction.offset()).rem_euclid(n);
        self.go_to_index(next, anim)
    }

    pub fn pointer_down<A: Tweener<Target, Prop>>(&mut self, x: f64, anim: &mut A) -> bool {
        if self.is_empty() {
            return false;
        }
        anim.kill_tweens_of(Target::Carousel);
        self.rotation = None;
        self.drag = Some(Drag {
            start_x: x,
            start_angle: self.angle(anim),
        });
        true
    }

    pub fn pointer_move<A: Tweener<Target, Prop>>(&mut self, x: f64, anim: &mut A) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let angle = drag.start_angle + (x - drag.start_x) * self.settings.sensitivity;
        anim.set(Target::Carousel, Prop::Rotation, angle);
        true
    }

    /// Ends a drag with exactly one settle onto the nearest card.
    pub fn pointer_up<A: Tweener<Target, Prop>>(&mut self, anim: &mut A) -> Option<AnimationId> {
        self.drag.take()?;
        let step = self.step()?;
        let nearest = (-self.angle(anim) / step).round();
        Some(self.animate_to(-nearest * step, anim))
    }

    /// Publishes the active index when `id` is the rotation this carousel
    /// started.
    pub fn finished<A: Tweener<Target, Prop>>(
        &mut self,
        id: AnimationId,
        anim: &A,
    ) -> Option<usize> {
        if self.rotation != Some(id) {
            return None;
        }
        self.rotation = None;
        let index = self.current_index(anim)?;
        self.active_index = index;
        log::info!(
            "Active project: {} ({})",
            index,
            self.cards[index].project.title
        );
        Some(index)
    }

    fn animate_to<A: Tweener<Target, Prop>>(&mut self, target: f64, anim: &mut A) -> AnimationId {
        anim.kill_tweens_of(Target::Carousel);
        let id = anim.to(
            Tween::to(Target::Carousel, Prop::Rotation, target)
                .duration(self.settings.settle())
                .ease(self.settings.ease),
        );
        self.rotation = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide::Animator;
    use std::time::Duration;

    type Motion = Animator<Target, Prop>;

    fn carousel(n: usize) -> Carousel {
        let cards = (0..n)
            .map(|i| {
                Card::without_image(ProjectConfig {
                    id: i as u32 + 1,
                    title: format!("Project {i}"),
                    description: String::new(),
                    image: None,
                    demo_url: None,
                    repo_url: None,
                })
            })
            .collect();
        Carousel::new(cards, CarouselConfig::default())
    }

    /// Runs the animator until the rotation has settled and feeds completions
    /// back the way the app does.
    fn settle(c: &mut Carousel, anim: &mut Motion) -> Vec<usize> {
        let mut published = Vec::new();
        let start = anim.clock() + Duration::from_millis(16);
        anim.tick(start);
        for id in anim.tick(start + Duration::from_secs(5)) {
            published.extend(c.finished(id, &*anim));
        }
        published
    }

    #[test]
    fn test_shortest_delta_range_and_landing() {
        let angles = [-725.0, -360.0, -179.0, -72.0, 0.0, 0.5, 72.0, 180.0, 181.0, 1000.0];
        for &theta in &angles {
            for &tau in &angles {
                let d = shortest_delta(theta, tau);
                assert!(d > -180.0 && d <= 180.0, "{theta} -> {tau}: {d}");
                let landed = (theta + d).rem_euclid(360.0);
                let wanted = tau.rem_euclid(360.0);
                let diff = (landed - wanted).abs();
                assert!(diff < 1e-9 || (360.0 - diff) < 1e-9, "{theta} -> {tau}");
            }
        }
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(0.0, -180.0), 180.0);
    }

    #[test]
    fn test_go_next_from_zero() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        assert_eq!(c.step(), Some(72.0));

        c.go(Direction::Next, &mut anim).unwrap();
        assert_eq!(settle(&mut c, &mut anim), vec![1]);
        assert!((c.angle(&anim) + 72.0).abs() < 1e-9);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_go_previous_wraps() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        c.go(Direction::Previous, &mut anim).unwrap();
        assert_eq!(settle(&mut c, &mut anim), vec![4]);
        assert!((c.angle(&anim) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_go_to_any_index_lands_modulo_n() {
        for n in 1..=7 {
            for i in -9_i64..=9 {
                let mut c = carousel(n);
                let mut anim = Motion::new();
                anim.set(Target::Carousel, Prop::Rotation, 37.0 * i as f64);
                c.go_to_index(i, &mut anim).unwrap();
                settle(&mut c, &mut anim);
                assert_eq!(c.active_index(), i.rem_euclid(n as i64) as usize, "n={n} i={i}");
            }
        }
    }

    #[test]
    fn test_go_to_huge_index_lands_modulo_n() {
        let cases = [
            i64::MAX,
            i64::MIN,
            100_000_000_000_000_001,
            123_456_789_012_345_678,
            -100_000_000_000_000_001,
        ];
        for n in [3, 5, 7] {
            for i in cases {
                let mut c = carousel(n);
                let mut anim = Motion::new();
                c.go_to_index(i, &mut anim).unwrap();
                settle(&mut c, &mut anim);
                let expected = i.rem_euclid(n as i64) as usize;
                assert_eq!(c.active_index(), expected, "n={n} i={i}");
            }
        }
    }

    #[test]
    fn test_go_to_index_never_exceeds_half_turn() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        anim.set(Target::Carousel, Prop::Rotation, -10.0 * 72.0);
        c.go_to_index(3, &mut anim).unwrap();
        settle(&mut c, &mut anim);
        assert!((c.angle(&anim) - (-10.0 * 72.0 + 144.0)).abs() < 1e-9);
    }

    #[test]
    fn test_new_rotation_replaces_in_flight_one() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        let first = c.go_to_index(1, &mut anim).unwrap();
        anim.tick(Duration::ZERO);
        anim.tick(Duration::from_millis(200));
        let second = c.go_to_index(2, &mut anim).unwrap();
        assert!(!anim.is_active(first));
        assert!(anim.is_active(second));
        assert_eq!(settle(&mut c, &mut anim), vec![2]);
    }

    #[test]
    fn test_drag_then_release_settles_once_on_step_multiple() {
        let mut c = carousel(5);
        let mut anim = Motion::new();

        assert!(c.pointer_down(100.0, &mut anim));
        assert!(c.pointer_move(500.0, &mut anim));
        assert!((c.angle(&anim) - 72.0).abs() < 1e-9);

        let settle_id = c.pointer_up(&mut anim).unwrap();
        assert!(c.pointer_up(&mut anim).is_none());
        assert!(anim.is_active(settle_id));

        assert_eq!(settle(&mut c, &mut anim), vec![4]);
        let angle = c.angle(&anim);
        assert!((angle / 72.0 - (angle / 72.0).round()).abs() < 1e-9);
    }

    #[test]
    fn test_drag_snaps_to_nearest() {
        let mut c = carousel(4);
        let mut anim = Motion::new();
        c.pointer_down(0.0, &mut anim);
        // -0.18 * 300 = -54 degrees, nearest step is -90
        c.pointer_move(-300.0, &mut anim);
        c.pointer_up(&mut anim);
        assert_eq!(settle(&mut c, &mut anim), vec![1]);
        assert!((c.angle(&anim) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_cancels_running_rotation() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        let id = c.go_to_index(2, &mut anim).unwrap();
        anim.tick(Duration::ZERO);
        anim.tick(Duration::from_millis(100));
        c.pointer_down(0.0, &mut anim);
        assert!(!anim.is_active(id));
        assert!(!c.is_rotating());
        assert!(anim.tick(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        assert!(!c.pointer_move(300.0, &mut anim));
        assert_eq!(c.angle(&anim), 0.0);
        assert!(c.pointer_up(&mut anim).is_none());
    }

    #[test]
    fn test_resize_during_drag_keeps_angle() {
        let mut c = carousel(5);
        let mut anim = Motion::new();
        c.pointer_down(0.0, &mut anim);
        c.pointer_move(100.0, &mut anim);
        let before = c.angle(&anim);
        assert!(c.resize(800.0));
        assert!((c.radius() - 280.0).abs() < 1e-9);
        assert!(c.is_dragging());
        assert_eq!(c.angle(&anim), before);
    }

    #[test]
    fn test_radius_clamped() {
        let mut c = carousel(3);
        c.resize(0.0);
        assert_eq!(c.radius(), MIN_RADIUS);
        c.resize(4000.0);
        assert_eq!(c.radius(), MAX_RADIUS);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut c = carousel(0);
        let mut anim = Motion::new();
        assert_eq!(c.step(), None);
        assert!(c.layout(&anim).is_empty());
        assert!(c.go(Direction::Next, &mut anim).is_none());
        assert!(c.go_to_index(3, &mut anim).is_none());
        assert!(!c.pointer_down(0.0, &mut anim));
        assert!(c.pointer_up(&mut anim).is_none());
        assert_eq!(c.current_index(&anim), None);
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_depth_mapping_extremes_and_monotone() {
        let front = CardTransform::compute(0, 72.0, 0.0, 300.0);
        assert!((front.depth - 1.0).abs() < 1e-12);
        assert!((front.scale - 1.0).abs() < 1e-12);
        assert!((front.opacity - 1.0).abs() < 1e-12);
        assert!(front.interactive);
        assert_eq!(front.blur, 0.0);
        assert_eq!(front.z_index, 1000);

        let back = CardTransform::compute(0, 72.0, 180.0, 300.0);
        assert!(back.depth.abs() < 1e-12);
        assert!((back.scale - 0.55).abs() < 1e-12);
        assert!((back.opacity - 0.15).abs() < 1e-12);
        assert!((back.blur - 5.0).abs() < 1e-9);
        assert!(!back.interactive);

        let mut samples: Vec<_> = (0..=180)
            .map(|deg| CardTransform::compute(0, 72.0, deg as f64, 300.0))
            .collect();
        samples.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        for pair in samples.windows(2) {
            assert!(pair[1].scale >= pair[0].scale);
            assert!(pair[1].opacity >= pair[0].opacity);
        }
    }

    #[test]
    fn test_behind_cards_face_forward() {
        let t = CardTransform::compute(2, 72.0, 0.0, 300.0);
        assert!(t.z < 0.0);
        assert!((t.rotation_y - (-144.0 + 180.0)).abs() < 1e-9);
        assert!(t.rotation_y.to_radians().cos() >= 0.0);

        let side = CardTransform::compute(1, 72.0, 0.0, 300.0);
        assert!(side.z > 0.0);
        assert!((side.rotation_y + 72.0).abs() < 1e-9);
        assert!(!side.interactive);
    }

    #[test]
    fn test_single_front_card() {
        let c = carousel(5);
        let anim = Motion::new();
        let interactive: Vec<_> = c
            .layout(&anim)
            .into_iter()
            .filter(|t| t.interactive)
            .map(|t| t.index)
            .collect();
        assert_eq!(interactive, vec![0]);
        assert_eq!(c.front_card(&anim), Some(0));
    }

    #[test]
    fn test_vertical_parallax() {
        let t = CardTransform::compute(0, 90.0, 0.0, 240.0);
        assert!((t.y - TILT).abs() < 1e-9);
        let t = CardTransform::compute(2, 90.0, 0.0, 240.0);
        assert!((t.y + TILT).abs() < 1e-9);
    }
}
