use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::Section;
use crate::gui::carousel::{self, Hit};
use crate::gui::geometry::{Point, Size};
use crate::gui::stage::Stage;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{about, hero, skills, window};
use crate::preferences::{self, ThemeMode};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Pointer travel below which a drag on the carousel counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Drawing surfaces of the stack pages.
#[derive(Debug, Clone, Default)]
pub struct Pages {
    pub hero: gtk::DrawingArea,
    pub about_scroll: gtk::ScrolledWindow,
    pub about_cards: gtk::DrawingArea,
    pub about_overlay: gtk::DrawingArea,
    pub skills: gtk::DrawingArea,
    pub projects: gtk::DrawingArea,
}

impl Pages {
    fn queue_draw(&self) {
        for area in [
            &self.hero,
            &self.about_cards,
            &self.about_overlay,
            &self.skills,
            &self.projects,
        ] {
            area.queue_draw();
        }
    }
}

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub section: Section,
    pub pages: Pages,
    pub theme_button: gtk::Button,
    pub stack: gtk::Stack,
    drag_origin: Option<Point>,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick(Duration),
    Resized(Section, Size),
    SectionShown(Section),
    Show(Section),
    Navigate(AppEvent),
    ToggleTheme,
    Escape,
    HeroMove(Point),
    HeroLeave,
    DragBegin(Point),
    DragUpdate(f64, f64),
    DragEnd(f64, f64),
    SecondaryClick(Point),
    AboutClick(Point),
    AboutScrolled(f64),
    OverlayClick(Point),
    SkillsClick(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show(section) => AppMsg::Show(section),
            AppEvent::ToggleTheme => AppMsg::ToggleTheme,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            other => AppMsg::Navigate(other),
        }
    }
}

fn theme_icon(mode: ThemeMode) -> &'static str {
    if mode.is_dark() {
        "weather-clear-symbolic"
    } else {
        "weather-clear-night-symbolic"
    }
}

fn reduced_motion(config: &Config) -> bool {
    preferences::reduced_motion(&config.motion, window::desktop_animations_enabled())
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&format!("Showcase · {}", model.section.title())),
            set_default_width: 1200,
            set_default_height: 800,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Escape);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "stack"]
            gtk::Stack {
                set_hexpand: true,
                set_vexpand: true,
                set_transition_type: gtk::StackTransitionType::Crossfade,

                connect_visible_child_name_notify[sender] => move |stack| {
                    if let Some(section) = stack
                        .visible_child_name()
                        .and_then(|name| name.parse::<Section>().ok())
                    {
                        sender.input(AppMsg::SectionShown(section));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        preferences::init();
        window::apply_theme(preferences::theme());

        let mut stage = Stage::new(&config, reduced_motion(&config));
        {
            let Stage { hero, motion, .. } = &mut stage;
            hero.start(motion);
        }
        let stage = Rc::new(RefCell::new(stage));

        let model = AppModel {
            stage: stage.clone(),
            section: Section::default(),
            pages: Pages::default(),
            theme_button: gtk::Button::default(),
            stack: gtk::Stack::default(),
            drag_origin: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.stack = widgets.stack.clone();
        model.pages = build_pages(&widgets.stack, &sender);
        model.theme_button = build_header(&root, &widgets.stack, &sender);
        connect_draw_funcs(&model.pages, &stage);

        let tick_sender = sender.clone();
        root.add_tick_callback(move |_, clock| {
            tick_sender.input(AppMsg::Tick(window::frame_time(clock)));
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tick(now) => {
                let (busy, overlay_up) = {
                    let mut stage = self.stage.borrow_mut();
                    (stage.tick(now), !stage.overlay.is_closed())
                };
                self.pages.about_overlay.set_can_target(overlay_up);
                if busy {
                    self.pages.queue_draw();
                }
            }
            AppMsg::Resized(section, size) => self.resize(section, size),
            AppMsg::SectionShown(section) => {
                log::debug!("Section: {}", section);
                self.section = section;
            }
            AppMsg::Show(section) => {
                self.stack.set_visible_child_name(section.as_ref());
            }
            AppMsg::Navigate(event) => {
                if self.stage.borrow_mut().navigate(&event) {
                    self.pages.queue_draw();
                } else {
                    log::debug!("Nothing to do for {:?}", event);
                }
            }
            AppMsg::Escape => {
                let mut stage = self.stage.borrow_mut();
                let Stage {
                    overlay,
                    about,
                    motion,
                    ..
                } = &mut *stage;
                overlay.escape(about, motion);
            }
            AppMsg::ToggleTheme => {
                let mode = preferences::toggle();
                window::apply_theme(mode);
                self.theme_button.set_icon_name(theme_icon(mode));
                self.pages.queue_draw();
            }
            AppMsg::HeroMove(point) => {
                let mut stage = self.stage.borrow_mut();
                let Stage { hero, motion, .. } = &mut *stage;
                hero.pointer_move(point, motion);
            }
            AppMsg::HeroLeave => {
                let mut stage = self.stage.borrow_mut();
                let Stage { hero, motion, .. } = &mut *stage;
                hero.pointer_leave(motion);
            }
            AppMsg::DragBegin(point) => {
                let mut stage = self.stage.borrow_mut();
                let Stage {
                    carousel, motion, ..
                } = &mut *stage;
                if carousel.pointer_down(point.x, motion) {
                    self.drag_origin = Some(point);
                }
            }
            AppMsg::DragUpdate(dx, _) => {
                let Some(origin) = self.drag_origin else {
                    return;
                };
                let mut stage = self.stage.borrow_mut();
                let Stage {
                    carousel, motion, ..
                } = &mut *stage;
                if carousel.pointer_move(origin.x + dx, motion) {
                    self.pages.projects.queue_draw();
                }
            }
            AppMsg::DragEnd(dx, dy) => {
                let Some(origin) = self.drag_origin.take() else {
                    return;
                };
                let hit = self.carousel_hit(origin);
                let mut stage = self.stage.borrow_mut();
                let Stage {
                    carousel, motion, ..
                } = &mut *stage;
                carousel.pointer_up(motion);

                if dx.hypot(dy) >= CLICK_SLOP {
                    return;
                }
                match hit {
                    Some(Hit::Indicator(i)) => {
                        carousel.go_to_index(i as i64, motion);
                    }
                    Some(Hit::Card(i)) => {
                        if let Some(url) = &carousel.cards[i].project.demo_url {
                            window::open_uri(url);
                        }
                    }
                    None => {}
                }
            }
            AppMsg::SecondaryClick(point) => {
                if let Some(Hit::Card(i)) = self.carousel_hit(point)
                    && let Some(url) = &self.stage.borrow().carousel.cards[i].project.repo_url
                {
                    window::open_uri(url);
                }
            }
            AppMsg::AboutClick(point) => {
                let mut stage = self.stage.borrow_mut();
                if !stage.overlay.is_closed() {
                    return;
                }
                if let Some(index) = stage.about.card_at(point) {
                    stage.open_about(index);
                    self.pages.about_overlay.set_can_target(true);
                }
            }
            AppMsg::OverlayClick(point) => {
                let mut stage = self.stage.borrow_mut();
                let Stage {
                    overlay,
                    about,
                    motion,
                    ..
                } = &mut *stage;
                overlay.click(point, about, motion);
            }
            AppMsg::AboutScrolled(value) => {
                let mut stage = self.stage.borrow_mut();
                if stage.about.is_scroll_locked() {
                    let locked = stage.about.scroll_offset();
                    drop(stage);
                    if (value - locked).abs() > 0.5 {
                        self.pages.about_scroll.vadjustment().set_value(locked);
                    }
                } else {
                    stage.about.set_scroll_offset(value);
                }
            }
            AppMsg::SkillsClick(point) => {
                let changed = self.stage.borrow_mut().skills.click(point);
                if changed {
                    self.sync_content_heights();
                    self.pages.skills.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.stage
                        .borrow_mut()
                        .reload(&new_config, reduced_motion(&new_config));
                    self.sync_content_heights();
                    self.pages.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn resize(&mut self, section: Section, size: Size) {
        {
            let mut stage = self.stage.borrow_mut();
            match section {
                Section::Home => stage.hero.resize(size),
                Section::About => stage.about.resize(size),
                Section::Skills => stage.skills.resize(size.width),
                Section::Projects => {
                    stage.carousel.resize(size.width);
                }
            }
        }
        self.sync_content_heights();
    }

    fn sync_content_heights(&self) {
        let stage = self.stage.borrow();
        self.pages
            .about_cards
            .set_content_height(stage.about.content_height().ceil() as i32);
        self.pages
            .skills
            .set_content_height(stage.skills.content_height().ceil() as i32);
    }

    fn carousel_hit(&self, point: Point) -> Option<Hit> {
        let stage = self.stage.borrow();
        let layout = stage.carousel.layout(&stage.motion);
        let active = stage.carousel.current_index(&stage.motion).unwrap_or(0);
        carousel::hit_test(
            window::widget_size(&self.pages.projects),
            &layout,
            active,
            point,
        )
    }
}

fn build_header(
    root: &gtk::ApplicationWindow,
    stack: &gtk::Stack,
    sender: &ComponentSender<AppModel>,
) -> gtk::Button {
    let header = gtk::HeaderBar::new();
    let switcher = gtk::StackSwitcher::builder().stack(stack).build();
    header.set_title_widget(Some(&switcher));

    let button = gtk::Button::builder()
        .icon_name(theme_icon(preferences::theme()))
        .tooltip_text("Toggle theme")
        .build();
    let sender = sender.clone();
    button.connect_clicked(move |_| sender.input(AppMsg::ToggleTheme));
    header.pack_end(&button);

    root.set_titlebar(Some(&header));
    button
}

fn report_resize(area: &gtk::DrawingArea, section: Section, sender: &ComponentSender<AppModel>) {
    let sender = sender.clone();
    area.connect_resize(move |_, w, h| {
        sender.input(AppMsg::Resized(section, Size::new(w as f64, h as f64)));
    });
}

fn on_click(
    area: &gtk::DrawingArea,
    button: u32,
    sender: &ComponentSender<AppModel>,
    msg: fn(Point) -> AppMsg,
) {
    let click = gtk::GestureClick::builder().button(button).build();
    let sender = sender.clone();
    click.connect_released(move |_, _, x, y| sender.input(msg(Point::new(x, y))));
    area.add_controller(click);
}

fn stage_area() -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder().hexpand(true).vexpand(true).build();
    area.add_css_class("showcase-stage");
    area
}

fn build_pages(stack: &gtk::Stack, sender: &ComponentSender<AppModel>) -> Pages {
    // home
    let hero = stage_area();
    let motion = gtk::EventControllerMotion::new();
    {
        let sender = sender.clone();
        motion.connect_motion(move |_, x, y| sender.input(AppMsg::HeroMove(Point::new(x, y))));
    }
    {
        let sender = sender.clone();
        motion.connect_leave(move |_| sender.input(AppMsg::HeroLeave));
    }
    hero.add_controller(motion);
    report_resize(&hero, Section::Home, sender);

    // about: scrolled cards with the flip overlay above
    let about_cards = stage_area();
    on_click(&about_cards, 1, sender, AppMsg::AboutClick);
    let about_scroll = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .child(&about_cards)
        .build();
    {
        let sender = sender.clone();
        about_scroll
            .vadjustment()
            .connect_value_changed(move |adj| sender.input(AppMsg::AboutScrolled(adj.value())));
    }
    let about_overlay = stage_area();
    about_overlay.remove_css_class("showcase-stage");
    about_overlay.set_can_target(false);
    on_click(&about_overlay, 1, sender, AppMsg::OverlayClick);
    report_resize(&about_overlay, Section::About, sender);
    let about_page = gtk::Overlay::new();
    about_page.set_child(Some(&about_scroll));
    about_page.add_overlay(&about_overlay);

    // skills
    let skills = stage_area();
    on_click(&skills, 1, sender, AppMsg::SkillsClick);
    report_resize(&skills, Section::Skills, sender);
    let skills_scroll = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .child(&skills)
        .build();

    // projects
    let projects = stage_area();
    let drag = gtk::GestureDrag::new();
    {
        let sender = sender.clone();
        drag.connect_drag_begin(move |_, x, y| sender.input(AppMsg::DragBegin(Point::new(x, y))));
    }
    {
        let sender = sender.clone();
        drag.connect_drag_update(move |_, dx, dy| sender.input(AppMsg::DragUpdate(dx, dy)));
    }
    {
        let sender = sender.clone();
        drag.connect_drag_end(move |_, dx, dy| sender.input(AppMsg::DragEnd(dx, dy)));
    }
    projects.add_controller(drag);
    on_click(&projects, 3, sender, AppMsg::SecondaryClick);
    report_resize(&projects, Section::Projects, sender);

    let projects_page = gtk::Overlay::new();
    projects_page.set_child(Some(&projects));
    for (icon, align, event) in [
        ("go-previous-symbolic", gtk::Align::Start, AppEvent::Prev),
        ("go-next-symbolic", gtk::Align::End, AppEvent::Next),
    ] {
        let button = gtk::Button::builder()
            .icon_name(icon)
            .halign(align)
            .valign(gtk::Align::Center)
            .margin_start(24)
            .margin_end(24)
            .build();
        button.add_css_class("circular");
        button.add_css_class("showcase-nav-button");
        let sender = sender.clone();
        button.connect_clicked(move |_| sender.input(AppMsg::Navigate(event.clone())));
        projects_page.add_overlay(&button);
    }

    for (page, section) in [
        (hero.upcast_ref::<gtk::Widget>(), Section::Home),
        (about_page.upcast_ref(), Section::About),
        (skills_scroll.upcast_ref(), Section::Skills),
        (projects_page.upcast_ref(), Section::Projects),
    ] {
        stack.add_titled(page, Some(section.as_ref()), section.title());
    }

    Pages {
        hero,
        about_scroll,
        about_cards,
        about_overlay,
        skills,
        projects,
    }
}

fn connect_draw_funcs(pages: &Pages, stage: &Rc<RefCell<Stage>>) {
    fn colors_for(area: &gtk::DrawingArea) -> ThemeColors {
        ThemeColors::from_context(&area.style_context())
    }
    fn size(w: i32, h: i32) -> Size {
        Size::new(w as f64, h as f64)
    }

    let s = stage.clone();
    pages.hero.set_draw_func(move |area, cr, w, h| {
        let stage = s.borrow();
        if let Err(e) = hero::draw(
            cr,
            &stage.hero,
            &stage.motion,
            &stage.hero_config,
            stage.portrait.as_ref(),
            size(w, h),
            &colors_for(area),
        ) {
            log::error!("Drawing error: {}", e);
        }
    });

    let s = stage.clone();
    pages.about_cards.set_draw_func(move |area, cr, _, _| {
        let stage = s.borrow();
        let suppressed = stage.overlay.index();
        if let Err(e) = about::draw_cards(cr, &stage.about, suppressed, &colors_for(area)) {
            log::error!("Drawing error: {}", e);
        }
    });

    let s = stage.clone();
    pages.about_overlay.set_draw_func(move |area, cr, w, h| {
        let stage = s.borrow();
        if let Err(e) = about::draw_overlay(
            cr,
            &stage.overlay,
            &stage.motion,
            &stage.about,
            size(w, h),
            &colors_for(area),
        ) {
            log::error!("Drawing error: {}", e);
        }
    });

    let s = stage.clone();
    pages.skills.set_draw_func(move |area, cr, w, _| {
        let stage = s.borrow();
        if let Err(e) = skills::draw(cr, &stage.skills, w as f64, &colors_for(area)) {
            log::error!("Drawing error: {}", e);
        }
    });

    let s = stage.clone();
    pages.projects.set_draw_func(move |area, cr, w, h| {
        let stage = s.borrow();
        if let Err(e) = carousel::draw(
            cr,
            &stage.carousel,
            &stage.motion,
            size(w, h),
            &colors_for(area),
        ) {
            log::error!("Drawing error: {}", e);
        }
    });
}
