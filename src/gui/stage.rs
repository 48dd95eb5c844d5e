use crate::config::{Config, HeroConfig, resolve_asset};
use crate::events::AppEvent;
use crate::gui::about::AboutBoard;
use crate::gui::carousel::{Card, Carousel, Direction};
use crate::gui::hero::Hero;
use crate::gui::overlay::OverlayController;
use crate::gui::skills::SkillsBoard;
use gdk_pixbuf::Pixbuf;
use glide::Animator;
use std::time::Duration;
use strum::{AsRefStr, EnumIter};

/// Animated objects on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum Target {
    Carousel,
    Backdrop,
    /// Outer container of the flip overlay, carries the rect.
    OverlayCard,
    /// Inner face of the flip overlay, carries the flip angle.
    OverlayInner,
    /// Entrance and idle float of the hero portrait.
    HeroFloat,
    /// Pointer-follow tilt of the hero portrait.
    HeroTilt,
    /// Pointer-speed stretch of the hero portrait.
    HeroImage,
}

/// Numeric properties an animation can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum Prop {
    Rotation,
    Opacity,
    Top,
    Left,
    Width,
    Height,
    RotateX,
    RotateY,
    Rotate,
    X,
    Y,
    Scale,
    ScaleX,
    ScaleY,
    Skew,
}

pub type Motion = Animator<Target, Prop>;

/// Everything the pages draw, plus the animator that moves it.
pub struct Stage {
    pub motion: Motion,
    pub carousel: Carousel,
    pub overlay: OverlayController,
    pub about: AboutBoard,
    pub skills: SkillsBoard,
    pub hero: Hero,
    pub hero_config: HeroConfig,
    pub portrait: Option<Pixbuf>,
}

fn load_portrait(config: &HeroConfig) -> Option<Pixbuf> {
    let path = resolve_asset(config.image.as_deref()?);
    Pixbuf::from_file(&path)
        .map_err(|e| log::debug!("No hero image at {}: {}", path.display(), e))
        .ok()
}

impl Stage {
    pub fn new(config: &Config, reduced_motion: bool) -> Self {
        Self::with_carousel(
            config,
            Carousel::from_config(&config.projects, config.carousel.clone()),
            load_portrait(&config.hero),
            reduced_motion,
        )
    }

    fn with_carousel(
        config: &Config,
        carousel: Carousel,
        portrait: Option<Pixbuf>,
        reduced_motion: bool,
    ) -> Self {
        Self {
            motion: Motion::new(),
            carousel,
            overlay: OverlayController::new(),
            about: AboutBoard::new(config.about.clone()),
            skills: SkillsBoard::new(config.skills.clone()),
            hero: Hero::new(reduced_motion),
            hero_config: config.hero.clone(),
            portrait,
        }
    }

    /// Swaps in freshly loaded content. An open about panel is dropped since
    /// its card may be gone.
    pub fn reload(&mut self, config: &Config, reduced_motion: bool) {
        self.overlay.reset(&mut self.about, &mut self.motion);
        self.carousel.reload(
            config.projects.iter().cloned().map(Card::new).collect(),
            config.carousel.clone(),
            &mut self.motion,
        );
        self.about.set_cards(config.about.clone());
        self.skills.set_skills(config.skills.clone());
        self.hero.set_reduced_motion(reduced_motion, &mut self.motion);
        self.hero_config = config.hero.clone();
        self.portrait = load_portrait(&config.hero);
    }

    /// Advances every animation and routes completions to their owners.
    /// Returns true while anything on screen may still change.
    pub fn tick(&mut self, now: Duration) -> bool {
        let finished = self.motion.tick(now);
        for &id in &finished {
            self.carousel.finished(id, &self.motion);
            self.overlay.finished(id, &mut self.about);
        }
        !finished.is_empty() || self.motion.is_animating() || self.carousel.is_dragging()
    }

    /// Applies a navigation event. Returns false for events that are not
    /// about navigation or did nothing.
    pub fn navigate(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Next => self.carousel.go(Direction::Next, &mut self.motion).is_some(),
            AppEvent::Prev => self
                .carousel
                .go(Direction::Previous, &mut self.motion)
                .is_some(),
            AppEvent::GoTo(i) => self.carousel.go_to_index(*i, &mut self.motion).is_some(),
            AppEvent::Close => self.overlay.escape(&mut self.about, &mut self.motion),
            AppEvent::ToggleTheme | AppEvent::Show(_) | AppEvent::ConfigReload => false,
        }
    }

    pub fn open_about(&mut self, index: usize) -> bool {
        self.overlay.open(index, &mut self.about, &mut self.motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CONFIG, parse_config};

    fn stage() -> Stage {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        let cards = config
            .projects
            .iter()
            .cloned()
            .map(Card::without_image)
            .collect();
        let carousel = Carousel::new(cards, config.carousel.clone());
        let mut stage = Stage::with_carousel(&config, carousel, None, false);
        stage.about.resize(crate::gui::geometry::Size::new(1200.0, 800.0));
        stage
    }

    fn run(stage: &mut Stage, secs: f64) {
        let now = stage.motion.clock() + Duration::from_millis(16);
        stage.tick(now);
        stage.tick(now + Duration::from_secs_f64(secs));
    }

    #[test]
    fn test_new_builds_carousel_from_projects() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        let s = Stage::new(&config, true);
        assert_eq!(s.carousel.len(), config.projects.len());
        assert_eq!(s.carousel.cards[1].project.title, "GameVault");
        assert!(s.portrait.is_none());
    }

    #[test]
    fn test_remote_navigation_rotates_carousel() {
        let mut s = stage();
        assert!(s.navigate(&AppEvent::Next));
        run(&mut s, 2.0);
        assert_eq!(s.carousel.active_index(), 1);

        assert!(s.navigate(&AppEvent::GoTo(-1)));
        run(&mut s, 2.0);
        assert_eq!(s.carousel.active_index(), 4);

        assert!(s.navigate(&AppEvent::Prev));
        run(&mut s, 2.0);
        assert_eq!(s.carousel.active_index(), 3);

        assert!(!s.navigate(&AppEvent::ConfigReload));
    }

    #[test]
    fn test_overlay_completions_are_routed() {
        let mut s = stage();
        assert!(!s.navigate(&AppEvent::Close));
        assert!(s.open_about(0));
        assert!(s.about.is_scroll_locked());
        run(&mut s, 1.0);
        assert!(matches!(
            s.overlay.state(),
            crate::gui::overlay::OverlayState::Open { .. }
        ));

        assert!(s.navigate(&AppEvent::Close));
        run(&mut s, 1.0);
        assert!(s.overlay.is_closed());
        assert!(!s.about.is_scroll_locked());
        assert!(!s.tick(s.motion.clock() + Duration::from_secs(1)));
    }

    #[test]
    fn test_reload_drops_open_panel() {
        let mut s = stage();
        s.open_about(1);
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.about.truncate(1);
        config.projects.clear();
        s.reload(&config, false);
        assert!(s.overlay.is_closed());
        assert!(!s.about.is_scroll_locked());
        assert!(s.carousel.is_empty());
        assert!(!s.navigate(&AppEvent::Next));
    }
}
