use super::{
    BACKDROP_IN_SECS, BACKDROP_OUT_SECS, CLOSE_BUTTON_SIZE, COLLAPSE_SECS, EXPAND_SECS,
    FLIP_IN_OFFSET, FLIP_IN_SECS, FLIP_OUT_SECS, H_MARGIN, MAX_HEIGHT, MAX_WIDTH, V_MARGIN,
};
use crate::gui::geometry::{Point, Rect, Size};
use crate::gui::stage::{Prop, Target};
use glide::{AnimationId, Ease, Timeline, Tween, Tweener};

/// What the overlay needs from the page hosting the cards.
pub trait OverlayHost {
    /// Current on-screen rectangle of card `index`, `None` when it is not
    /// laid out.
    fn measure(&self, index: usize) -> Option<Rect>;

    fn viewport(&self) -> Size;

    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    Closed,
    Opening {
        origin: Rect,
        index: usize,
        animation: AnimationId,
    },
    Open {
        origin: Option<Rect>,
        index: usize,
    },
    Closing {
        origin: Rect,
        index: usize,
        animation: AnimationId,
    },
}

impl OverlayState {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Opening { index, .. }
            | Self::Open { index, .. }
            | Self::Closing { index, .. } => Some(*index),
        }
    }

    fn origin(&self) -> Option<Rect> {
        match self {
            Self::Closed => None,
            Self::Opening { origin, .. } | Self::Closing { origin, .. } => Some(*origin),
            Self::Open { origin, .. } => *origin,
        }
    }
}

/// Centered detail rectangle for a viewport.
pub fn target_rect(viewport: Size) -> Rect {
    let width = (viewport.width - H_MARGIN).min(MAX_WIDTH).max(0.0);
    let height = (viewport.height - V_MARGIN).min(MAX_HEIGHT).max(0.0);
    Rect::new(
        ((viewport.height - height) / 2.0).round(),
        ((viewport.width - width) / 2.0).round(),
        width,
        height,
    )
}

/// Close control in the panel's top-right corner.
pub fn close_button_rect(panel: &Rect) -> Rect {
    Rect::new(
        panel.top + 16.0,
        panel.right() - 16.0 - CLOSE_BUTTON_SIZE,
        CLOSE_BUTTON_SIZE,
        CLOSE_BUTTON_SIZE,
    )
}

/// Shared-element transition between a card and its detail panel.
///
/// Open requests are only honoured from `Closed`; a request that arrives
/// while a panel is opening, open or closing is dropped.
#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayController {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Closed,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn is_closed(&self) -> bool {
        self.state == OverlayState::Closed
    }

    /// The triggering card is hidden while its panel is up.
    pub fn is_suppressed(&self, index: usize) -> bool {
        self.state.index() == Some(index)
    }

    pub fn open<A, H>(&mut self, index: usize, host: &mut H, anim: &mut A) -> bool
    where
        A: Tweener<Target, Prop>,
        H: OverlayHost,
    {
        if !self.is_closed() {
            log::debug!("Ignoring open({}) while overlay is {:?}", index, self.state);
            return false;
        }

        host.set_scroll_locked(true);
        let target = target_rect(host.viewport());

        let Some(origin) = host.measure(index) else {
            Self::write_rect(anim, &target);
            anim.set(Target::Backdrop, Prop::Opacity, 1.0);
            anim.set(Target::OverlayInner, Prop::RotateY, 180.0);
            self.state = OverlayState::Open {
                origin: None,
                index,
            };
            return true;
        };

        Self::write_rect(anim, &origin);
        let timeline = Timeline::new()
            .at_secs(
                0.0,
                Tween::from_to(Target::Backdrop, Prop::Opacity, 0.0, 1.0)
                    .secs(BACKDROP_IN_SECS)
                    .ease(Ease::Power1Out),
            )
            .at_secs(
                FLIP_IN_OFFSET,
                Tween::from_to(Target::OverlayInner, Prop::RotateY, 0.0, 180.0)
                    .secs(FLIP_IN_SECS)
                    .ease(Ease::Power3Out),
            );
        let timeline = Self::rect_tweens(&target, EXPAND_SECS, Ease::Power3Out)
            .into_iter()
            .fold(timeline, |tl, tween| tl.at_secs(0.0, tween));

        let animation = anim.play(timeline);
        self.state = OverlayState::Opening {
            origin,
            index,
            animation,
        };
        true
    }

    pub fn close<A, H>(&mut self, host: &mut H, anim: &mut A) -> bool
    where
        A: Tweener<Target, Prop>,
        H: OverlayHost,
    {
        let index = match self.state {
            OverlayState::Closed | OverlayState::Closing { .. } => return false,
            OverlayState::Opening { index, .. } | OverlayState::Open { index, .. } => index,
        };

        for target in [Target::Backdrop, Target::OverlayCard, Target::OverlayInner] {
            anim.kill_tweens_of(target);
        }

        let Some(origin) = host.measure(index).or(self.state.origin()) else {
            self.finish_close(host);
            return true;
        };

        let timeline = Timeline::new()
            .at_secs(
                0.0,
                Tween::to(Target::Backdrop, Prop::Opacity, 0.0)
                    .secs(BACKDROP_OUT_SECS)
                    .ease(Ease::Power1Out),
            )
            .at_secs(
                0.0,
                Tween::to(Target::OverlayInner, Prop::RotateY, 0.0)
                    .secs(FLIP_OUT_SECS)
                    .ease(Ease::Power3Out),
            );
        let timeline = Self::rect_tweens(&origin, COLLAPSE_SECS, Ease::Power3InOut)
            .into_iter()
            .fold(timeline, |tl, tween| tl.at_secs(0.0, tween));

        let animation = anim.play(timeline);
        self.state = OverlayState::Closing {
            origin,
            index,
            animation,
        };
        true
    }

    /// Escape only does something while a panel is up.
    pub fn escape<A, H>(&mut self, host: &mut H, anim: &mut A) -> bool
    where
        A: Tweener<Target, Prop>,
        H: OverlayHost,
    {
        !self.is_closed() && self.close(host, anim)
    }

    /// Clicks on the backdrop or the close control close the panel; clicks
    /// elsewhere on the panel are swallowed.
    pub fn click<A, H>(&mut self, point: Point, host: &mut H, anim: &mut A) -> bool
    where
        A: Tweener<Target, Prop>,
        H: OverlayHost,
    {
        let Some(panel) = self.panel_rect(anim) else {
            return false;
        };
        if panel.contains(point) && !close_button_rect(&panel).contains(point) {
            return false;
        }
        self.close(host, anim)
    }

    /// Advances the state machine when one of its timelines completes.
    pub fn finished<H: OverlayHost>(&mut self, id: AnimationId, host: &mut H) -> bool {
        match self.state {
            OverlayState::Opening {
                origin,
                index,
                animation,
            } if animation == id => {
                self.state = OverlayState::Open {
                    origin: Some(origin),
                    index,
                };
                true
            }
            OverlayState::Closing { animation, .. } if animation == id => {
                self.finish_close(host);
                true
            }
            _ => false,
        }
    }

    /// Drops any panel immediately, e.g. when the cards behind it changed.
    pub fn reset<A, H>(&mut self, host: &mut H, anim: &mut A)
    where
        A: Tweener<Target, Prop>,
        H: OverlayHost,
    {
        if self.is_closed() {
            return;
        }
        for target in [Target::Backdrop, Target::OverlayCard, Target::OverlayInner] {
            anim.kill_tweens_of(target);
        }
        self.finish_close(host);
    }

    pub fn panel_rect<A: Tweener<Target, Prop>>(&self, anim: &A) -> Option<Rect> {
        if self.is_closed() {
            return None;
        }
        Some(Rect::new(
            anim.get(Target::OverlayCard, Prop::Top)?,
            anim.get(Target::OverlayCard, Prop::Left)?,
            anim.get(Target::OverlayCard, Prop::Width)?,
            anim.get(Target::OverlayCard, Prop::Height)?,
        ))
    }

    pub fn backdrop_opacity<A: Tweener<Target, Prop>>(&self, anim: &A) -> f64 {
        anim.value_or(Target::Backdrop, Prop::Opacity, 0.0)
    }

    pub fn flip<A: Tweener<Target, Prop>>(&self, anim: &A) -> f64 {
        anim.value_or(Target::OverlayInner, Prop::RotateY, 0.0)
    }

    /// The detail face shows once the flip passes edge-on.
    pub fn shows_back<A: Tweener<Target, Prop>>(&self, anim: &A) -> bool {
        self.flip(anim) > 90.0
    }

    fn finish_close<H: OverlayHost>(&mut self, host: &mut H) {
        self.state = OverlayState::Closed;
        host.set_scroll_locked(false);
    }

    fn write_rect<A: Tweener<Target, Prop>>(anim: &mut A, rect: &Rect) {
        anim.set(Target::OverlayCard, Prop::Top, rect.top);
        anim.set(Target::OverlayCard, Prop::Left, rect.left);
        anim.set(Target::OverlayCard, Prop::Width, rect.width);
        anim.set(Target::OverlayCard, Prop::Height, rect.height);
    }

    fn rect_tweens(rect: &Rect, secs: f64, ease: Ease) -> [Tween<Target, Prop>; 4] {
        [
            (Prop::Top, rect.top),
            (Prop::Left, rect.left),
            (Prop::Width, rect.width),
            (Prop::Height, rect.height),
        ]
        .map(|(prop, value)| {
            Tween::to(Target::OverlayCard, prop, value)
                .secs(secs)
                .ease(ease)
        })
    }
}
