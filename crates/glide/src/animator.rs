use crate::ease::Ease;
use crate::timeline::Timeline;
use crate::tween::Tween;
use derive_more::{Display, From, Into};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

/// Handle returned for every started tween or timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("anim#{_0}")]
pub struct AnimationId(u64);

/// Settings for a repeatedly retargeted single-property tween, the kind used
/// for pointer-follow effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickTo<T, P> {
    pub target: T,
    pub prop: P,
    pub duration: Duration,
    pub ease: Ease,
}

impl<T, P> QuickTo<T, P> {
    pub fn new(target: T, prop: P, duration: Duration, ease: Ease) -> Self {
        Self {
            target,
            prop,
            duration,
            ease,
        }
    }
}

/// What the carousel, overlay and hero code need from an animation engine.
pub trait Tweener<T, P> {
    fn get(&self, target: T, prop: P) -> Option<f64>;

    fn set(&mut self, target: T, prop: P, value: f64);

    fn to(&mut self, tween: Tween<T, P>) -> AnimationId;

    fn play(&mut self, timeline: Timeline<T, P>) -> AnimationId;

    fn kill_tweens_of(&mut self, target: T);

    fn quick_to(&mut self, quick: &QuickTo<T, P>, value: f64) -> AnimationId;

    fn value_or(&self, target: T, prop: P, default: f64) -> f64 {
        self.get(target, prop).unwrap_or(default)
    }
}

#[derive(Debug)]
struct Entry<T, P> {
    offset: Duration,
    tween: Tween<T, P>,
    start: Option<f64>,
    done: bool,
}

#[derive(Debug)]
struct Running<T, P> {
    id: AnimationId,
    started_at: Option<Duration>,
    entries: Vec<Entry<T, P>>,
}

impl<T, P> Running<T, P> {
    fn is_finished(&self) -> bool {
        self.entries.iter().all(|e| e.done)
    }
}

/// Owns every animated value and the tweens writing them. Driven by
/// [`Animator::tick`] from the host's frame clock.
#[derive(Debug)]
pub struct Animator<T, P> {
    values: HashMap<(T, P), f64>,
    running: Vec<Running<T, P>>,
    clock: Duration,
    next_id: u64,
}

impl<T, P> Default for Animator<T, P> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            running: Vec::new(),
            clock: Duration::ZERO,
            next_id: 1,
        }
    }
}

impl<T, P> Animator<T, P>
where
    T: Copy + Eq + Hash + Debug,
    P: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    pub fn is_active(&self, id: AnimationId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    pub fn is_target_animating(&self, target: T) -> bool {
        self.running
            .iter()
            .flat_map(|r| &r.entries)
            .any(|e| !e.done && e.tween.target == target)
    }

    /// Cancels only the tweens writing `prop` on `target`.
    pub fn kill_property(&mut self, target: T, prop: P) {
        self.kill_where(|tween| tween.target == target && tween.prop == prop);
    }

    /// Advances every animation to `now` and writes the interpolated values.
    /// Animations started since the previous tick begin at `now`. Returns the
    /// animations that completed on this tick, in the order they were started.
    pub fn tick(&mut self, now: Duration) -> Vec<AnimationId> {
        self.clock = now;
        let Self {
            values, running, ..
        } = self;

        for anim in running.iter_mut() {
            let started_at = *anim.started_at.get_or_insert(now);
            let elapsed = now.saturating_sub(started_at);

            for entry in anim.entries.iter_mut().filter(|e| !e.done) {
                let Some(local) = elapsed.checked_sub(entry.offset) else {
                    continue;
                };
                let key = (entry.tween.target, entry.tween.prop);
                if local < entry.tween.delay {
                    continue;
                }
                let start = *entry.start.get_or_insert_with(|| {
                    entry
                        .tween
                        .from
                        .or_else(|| values.get(&key).copied())
                        .unwrap_or(0.0)
                });
                if let Some((value, done)) = entry.tween.sample(start, local) {
                    values.insert(key, value);
                    entry.done = done;
                }
            }
        }

        let mut finished = Vec::new();
        running.retain(|anim| {
            if anim.is_finished() {
                finished.push(anim.id);
                false
            } else {
                true
            }
        });

        if !finished.is_empty() {
            log::trace!("Finished animations: {:?}", finished);
        }
        finished
    }

    fn start(&mut self, timeline: Timeline<T, P>) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        // explicit start values render immediately, even while delayed
        for (_, tween) in &timeline.entries {
            if let Some(from) = tween.from {
                self.values.insert((tween.target, tween.prop), from);
            }
        }

        let entries = timeline
            .entries
            .into_iter()
            .map(|(offset, tween)| Entry {
                offset,
                tween,
                start: None,
                done: false,
            })
            .collect();

        self.running.push(Running {
            id,
            started_at: None,
            entries,
        });
        id
    }

    fn kill_where(&mut self, matches: impl Fn(&Tween<T, P>) -> bool) {
        for anim in self.running.iter_mut() {
            anim.entries.retain(|e| !matches(&e.tween));
        }
        // nothing left pending means the animation was cancelled, not completed
        self.running
            .retain(|anim| anim.entries.iter().any(|e| !e.done));
    }
}

impl<T, P> Tweener<T, P> for Animator<T, P>
where
    T: Copy + Eq + Hash + Debug,
    P: Copy + Eq + Hash + Debug,
{
    fn get(&self, target: T, prop: P) -> Option<f64> {
        self.values.get(&(target, prop)).copied()
    }

    fn set(&mut self, target: T, prop: P, value: f64) {
        self.values.insert((target, prop), value);
    }

    fn to(&mut self, tween: Tween<T, P>) -> AnimationId {
        self.start(Timeline::from(tween))
    }

    fn play(&mut self, timeline: Timeline<T, P>) -> AnimationId {
        self.start(timeline)
    }

    fn kill_tweens_of(&mut self, target: T) {
        self.kill_where(|tween| tween.target == target);
    }

    fn quick_to(&mut self, quick: &QuickTo<T, P>, value: f64) -> AnimationId {
        self.kill_property(quick.target, quick.prop);
        self.to(
            Tween::to(quick.target, quick.prop, value)
                .duration(quick.duration)
                .ease(quick.ease),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Repeat;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Target {
        Wheel,
        Card,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Prop {
        Angle,
        Opacity,
        Width,
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_tween_starts_from_current_value() {
        let mut anim = Animator::new();
        anim.set(Target::Wheel, Prop::Angle, 10.0);
        let id = anim.to(
            Tween::to(Target::Wheel, Prop::Angle, 20.0)
                .secs(1.0)
                .ease(Ease::Linear),
        );

        assert!(anim.tick(ms(5000)).is_empty());
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), Some(10.0));

        assert!(anim.tick(ms(5500)).is_empty());
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), Some(15.0));

        assert_eq!(anim.tick(ms(6000)), vec![id]);
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), Some(20.0));
        assert!(!anim.is_animating());
        assert!(anim.tick(ms(7000)).is_empty());
    }

    #[test]
    fn test_missing_value_starts_at_zero() {
        let mut anim = Animator::new();
        anim.to(Tween::to(Target::Card, Prop::Opacity, 1.0).secs(1.0).ease(Ease::Linear));
        anim.tick(ms(0));
        anim.tick(ms(500));
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(0.5));
    }

    #[test]
    fn test_timeline_offsets_share_clock() {
        let mut anim = Animator::new();
        anim.set(Target::Card, Prop::Width, 100.0);
        let id = anim.play(
            Timeline::new()
                .at_secs(
                    0.0,
                    Tween::from_to(Target::Card, Prop::Opacity, 0.0, 1.0).secs(0.2),
                )
                .at_secs(0.0, Tween::to(Target::Card, Prop::Width, 200.0).secs(0.55))
                .at_secs(0.05, Tween::to(Target::Wheel, Prop::Angle, 180.0).secs(0.55)),
        );

        // explicit from renders before the first tick
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(0.0));

        anim.tick(ms(1000));
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), None);

        anim.tick(ms(1040));
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), None);

        assert!(anim.tick(ms(1300)).is_empty());
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(1.0));
        assert!(anim.get(Target::Wheel, Prop::Angle).unwrap() > 0.0);

        assert!(anim.tick(ms(1590)).is_empty());
        assert_eq!(anim.tick(ms(1600)), vec![id]);
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), Some(180.0));
        assert_eq!(anim.get(Target::Card, Prop::Width), Some(200.0));
    }

    #[test]
    fn test_completion_reported_once() {
        let mut anim = Animator::new();
        let id = anim.to(Tween::to(Target::Card, Prop::Opacity, 1.0).secs(0.1));
        anim.tick(ms(0));
        let finished: Vec<_> = [100, 200, 300]
            .into_iter()
            .flat_map(|t| anim.tick(ms(t)))
            .collect();
        assert_eq!(finished, vec![id]);
    }

    #[test]
    fn test_kill_tweens_of_target_cancels_without_completion() {
        let mut anim = Animator::new();
        let wheel = anim.to(Tween::to(Target::Wheel, Prop::Angle, 90.0).secs(1.0));
        let card = anim.to(Tween::to(Target::Card, Prop::Opacity, 1.0).secs(1.0));
        anim.tick(ms(0));
        anim.tick(ms(300));
        let frozen = anim.get(Target::Wheel, Prop::Angle);

        anim.kill_tweens_of(Target::Wheel);
        assert!(!anim.is_active(wheel));
        assert!(anim.is_active(card));
        assert!(!anim.is_target_animating(Target::Wheel));

        assert_eq!(anim.tick(ms(2000)), vec![card]);
        assert_eq!(anim.get(Target::Wheel, Prop::Angle), frozen);
    }

    #[test]
    fn test_kill_reaches_into_timelines() {
        let mut anim = Animator::new();
        let id = anim.play(
            Timeline::new()
                .at_secs(0.0, Tween::to(Target::Card, Prop::Opacity, 1.0).secs(0.2))
                .at_secs(0.0, Tween::to(Target::Wheel, Prop::Angle, 180.0).secs(1.0)),
        );
        anim.tick(ms(0));
        anim.kill_tweens_of(Target::Wheel);
        assert!(anim.is_active(id));
        assert_eq!(anim.tick(ms(200)), vec![id]);

        let id = anim.play(
            Timeline::new().at_secs(0.0, Tween::to(Target::Wheel, Prop::Angle, 0.0).secs(1.0)),
        );
        anim.kill_tweens_of(Target::Wheel);
        assert!(!anim.is_active(id));
    }

    #[test]
    fn test_quick_to_retargets_single_channel() {
        let mut anim = Animator::new();
        let other = anim.to(Tween::to(Target::Card, Prop::Width, 50.0).secs(1.0));
        let quick = QuickTo::new(Target::Card, Prop::Opacity, ms(1000), Ease::Linear);

        let first = anim.quick_to(&quick, 1.0);
        anim.tick(ms(0));
        anim.tick(ms(500));
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(0.5));

        let second = anim.quick_to(&quick, 0.0);
        assert!(!anim.is_active(first));
        assert!(anim.is_active(other));

        anim.tick(ms(600));
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(0.5));
        assert_eq!(anim.tick(ms(1600)), vec![other, second]);
        assert_eq!(anim.get(Target::Card, Prop::Opacity), Some(0.0));
    }

    #[test]
    fn test_forever_tween_never_completes() {
        let mut anim = Animator::new();
        anim.to(
            Tween::to(Target::Card, Prop::Width, -12.0)
                .secs(3.6)
                .ease(Ease::SineInOut)
                .repeat(Repeat::Forever)
                .yoyo(true),
        );
        anim.tick(ms(0));
        for t in 1..50 {
            assert!(anim.tick(ms(t * 1000)).is_empty());
        }
        assert!(anim.is_animating());
    }

    #[test]
    fn test_later_animation_wins_same_channel() {
        let mut anim = Animator::new();
        anim.to(Tween::to(Target::Card, Prop::Width, 10.0).secs(1.0));
        anim.to(Tween::to(Target::Card, Prop::Width, 99.0).duration(Duration::ZERO));
        anim.tick(ms(0));
        assert_eq!(anim.get(Target::Card, Prop::Width), Some(99.0));
    }

    #[test]
    fn test_value_or_default() {
        let anim: Animator<Target, Prop> = Animator::new();
        assert_eq!(anim.value_or(Target::Card, Prop::Width, 7.0), 7.0);
    }
}
