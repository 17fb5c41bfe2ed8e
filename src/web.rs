//! Browser bindings.
//!
//! Each `init_*` function wires one behaviour to the live DOM. Listeners and
//! observers live for the whole page session, so their closures are handed
//! to the browser and forgotten. A missing element disables its behaviour
//! without an error.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::{
    AnchorConfig, CounterConfig, MenuConfig, NavbarConfig, ParallaxConfig, RevealConfig,
    SequenceConfig,
};
use crate::scroll::{anchor_selector, scroll_destination, translate_y};
use crate::{
    CounterAnimation, MenuState, MenuToggle, NavbarScroll, ObserveOptions, PageConfig, Parallax,
    SequenceDetector, Visibility, VisibilityObserver, WatchId,
};

const BANNER: &str = "\n%c LEKKA %c Don't be Shy. Just Lekka it. 💸\n";
const BANNER_TITLE_STYLE: &str = concat!(
    "background: #CCFF00; color: #0a0a0a; ",
    "font-size: 24px; font-weight: bold; padding: 10px 20px;",
);
const BANNER_TAGLINE_STYLE: &str =
    "background: #0a0a0a; color: #CCFF00; font-size: 14px; padding: 10px 20px;";
const CREDITS: &str = "%c Built with 💚 in India ";
const CREDITS_STYLE: &str = "color: #00FF88; font-size: 12px;";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type ObserverCallback = dyn FnMut(js_sys::Array, IntersectionObserver);

/// Install every behaviour with the default configuration.
///
/// Call this from JavaScript once the DOM is ready
/// (`DOMContentLoaded` or a deferred module script).
#[wasm_bindgen(js_name = enhancePage)]
pub fn start() -> Result<(), JsValue> {
    init_logging();
    install(&PageConfig::default()).map_err(|e| JsValue::from_str(&e))
}

/// Install every behaviour with a TOML configuration.
#[cfg(feature = "toml")]
#[wasm_bindgen(js_name = enhancePageWithConfig)]
pub fn start_with_config(toml: &str) -> Result<(), JsValue> {
    init_logging();
    let config = PageConfig::from_toml_str(toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(&config).map_err(|e| JsValue::from_str(&e))
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install every behaviour described by `config`.
///
/// A behaviour that fails to install is logged and skipped; the others
/// are still installed.
pub fn install(config: &PageConfig) -> Result<(), String> {
    config.validate().map_err(|e| e.to_string())?;
    let window = web_sys::window().ok_or("No window available")?;
    let document = window.document().ok_or("No document available")?;

    report("navbar", init_navbar(&window, &document, &config.navbar));
    report("mobile menu", init_mobile_menu(&document, &config.menu));
    report(
        "smooth scroll",
        init_smooth_scroll(&window, &document, &config.anchor, &config.navbar.id),
    );
    report("scroll reveal", init_scroll_reveal(&document, &config.reveal));
    report("parallax", init_parallax(&window, &document, &config.parallax));
    report("counters", init_counter_animation(&document, &config.counter));
    report("key sequence", init_sequence_effect(&document, &config.sequence));

    if config.banner {
        print_banner();
    }
    log::info!("landing page behaviours installed");
    Ok(())
}

fn report(feature: &str, result: Result<(), String>) {
    if let Err(err) = result {
        log::warn!("{} disabled: {}", feature, err);
    }
}

/// Toggle the navbar's scrolled class as the page scrolls.
pub fn init_navbar(
    window: &Window,
    document: &Document,
    config: &NavbarConfig,
) -> Result<(), String> {
    let Some(navbar) = document.get_element_by_id(&config.id) else {
        log::debug!("#{} not found, navbar scroll state disabled", config.id);
        return Ok(());
    };

    let mut state = NavbarScroll::new(config.scroll_threshold);
    let class = config.scrolled_class.clone();
    let scroll_window = window.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        if let Some(scrolled) = state.update(scroll_y(&scroll_window)) {
            let classes = navbar.class_list();
            let _ = if scrolled { classes.add_1(&class) } else { classes.remove_1(&class) };
        }
    }) as Box<dyn FnMut()>);

    listen(window, "scroll", on_scroll, true)
}

/// DOM side of the mobile menu.
struct MenuView {
    toggle: Element,
    menu: Element,
    body: Option<HtmlElement>,
    active_class: String,
    body_open_class: String,
    state: RefCell<MenuToggle>,
}

impl MenuView {
    fn render(&self, state: MenuState) {
        let open = state == MenuState::Open;
        set_class(&self.toggle, &self.active_class, open);
        set_class(&self.menu, &self.active_class, open);
        if let Some(body) = &self.body {
            set_class(body, &self.body_open_class, open);
        }
        let _ = self.toggle.set_attribute("aria-expanded", state.aria_expanded());
    }

    fn toggle(&self) {
        let state = self.state.borrow_mut().toggle();
        self.render(state);
    }

    fn close(&self) {
        self.state.borrow_mut().close();
        self.render(MenuState::Closed);
    }

    fn handle_key(&self, key: &str) {
        let closed = self.state.borrow_mut().handle_key(key);
        if closed {
            self.render(MenuState::Closed);
        }
    }
}

/// Open and close the mobile menu from its toggle, its links and Escape.
pub fn init_mobile_menu(document: &Document, config: &MenuConfig) -> Result<(), String> {
    let (Some(toggle), Some(menu)) = (
        document.get_element_by_id(&config.toggle_id),
        document.get_element_by_id(&config.menu_id),
    ) else {
        log::debug!("mobile menu elements not found, menu disabled");
        return Ok(());
    };

    let view = Rc::new(MenuView {
        toggle: toggle.clone(),
        menu,
        body: document.body(),
        active_class: config.active_class.clone(),
        body_open_class: config.body_open_class.clone(),
        state: RefCell::new(MenuToggle::new()),
    });

    let toggle_view = Rc::clone(&view);
    let on_toggle = Closure::wrap(Box::new(move || toggle_view.toggle()) as Box<dyn FnMut()>);
    listen(&toggle, "click", on_toggle, false)?;

    for link in query_all(document, &config.link_selector)? {
        let link_view = Rc::clone(&view);
        let on_link = Closure::wrap(Box::new(move || link_view.close()) as Box<dyn FnMut()>);
        listen(&link, "click", on_link, false)?;
    }

    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        view.handle_key(&event.key());
    }) as Box<dyn FnMut(KeyboardEvent)>);
    listen(document, "keydown", on_key, false)
}

/// Smoothly scroll same-page anchor links to their target, below the header.
pub fn init_smooth_scroll(
    window: &Window,
    document: &Document,
    config: &AnchorConfig,
    header_id: &str,
) -> Result<(), String> {
    for link in query_all(document, &config.link_selector)? {
        let anchor = link.clone();
        let window = window.clone();
        let document = document.clone();
        let header_id = header_id.to_string();
        let margin = config.margin;

        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            // Invalid selectors behave like missing targets.
            let Ok(Some(target)) = document.query_selector(selector) else {
                return;
            };
            event.prevent_default();

            let header_height = document
                .get_element_by_id(&header_id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                .map(|e| e.offset_height() as f64)
                .unwrap_or(0.0);
            let top = scroll_destination(
                target.get_bounding_client_rect().top(),
                scroll_y(&window),
                header_height,
                margin,
            );

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }) as Box<dyn FnMut(Event)>);

        listen(&link, "click", on_click, false)?;
    }
    Ok(())
}

/// Reveal sections once when they scroll into view.
pub fn init_scroll_reveal(document: &Document, config: &RevealConfig) -> Result<(), String> {
    let mut elements = query_all(document, &config.selector)?;
    for element in &elements {
        let _ = element.class_list().add_1(&config.pending_class);
    }

    for container in query_all(document, &config.stagger_selector)? {
        let _ = container.class_list().add_1(&config.stagger_class);
        if !elements.contains(&container) {
            elements.push(container);
        }
    }

    let revealed = config.revealed_class.clone();
    watch_once(elements, &config.observe, move |element| {
        let _ = element.class_list().add_1(&revealed);
    })
}

/// Shift decorative elements against the scroll, once per animation frame.
pub fn init_parallax(
    window: &Window,
    document: &Document,
    config: &ParallaxConfig,
) -> Result<(), String> {
    if prefers_reduced_motion(window) {
        log::debug!("reduced motion preferred, parallax disabled");
        return Ok(());
    }

    let elements: Rc<Vec<HtmlElement>> = Rc::new(
        query_all(document, &config.selector)?
            .into_iter()
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .collect(),
    );
    if elements.is_empty() {
        return Ok(());
    }

    let state = Rc::new(RefCell::new(Parallax::new(config.speed)));
    let scroll_window = window.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        if !state.borrow_mut().on_scroll() {
            return;
        }

        let frame_state = Rc::clone(&state);
        let frame_elements = Rc::clone(&elements);
        let frame_window = scroll_window.clone();
        let frame = Closure::once_into_js(move || {
            let offset = frame_state.borrow_mut().on_frame(scroll_y(&frame_window));
            let transform = translate_y(offset);
            for element in frame_elements.iter() {
                let _ = element.style().set_property("transform", &transform);
            }
        });

        if scroll_window.request_animation_frame(frame.unchecked_ref()).is_err() {
            state.borrow_mut().cancel_frame();
        }
    }) as Box<dyn FnMut()>);

    listen(window, "scroll", on_scroll, true)
}

/// Count statistics up from zero when they scroll into view.
pub fn init_counter_animation(
    document: &Document,
    config: &CounterConfig,
) -> Result<(), String> {
    let counters = query_all(document, &config.selector)?;
    let glyphs = config.glyphs.clone();
    let timing = config.timing;

    watch_once(counters, &config.observe, move |element| {
        let text = element.text_content().unwrap_or_default();
        match CounterAnimation::from_display(&text, &glyphs, timing) {
            Ok(animation) => animate_counter(element.clone(), animation),
            Err(err) => log::warn!("{}, counter left unanimated", err),
        }
    })
}

/// Run a counter animation on `element` with a repeating timer.
///
/// The timer clears itself after writing the final text.
pub fn animate_counter(element: Element, mut animation: CounterAnimation) {
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&handle);

    let interval = Interval::new(animation.timing().interval_ms(), move || {
        if let Some(text) = animation.tick() {
            element.set_text_content(Some(&text));
        }
        if animation.is_finished() {
            // Dropping the interval clears it.
            slot.borrow_mut().take();
        }
    });
    *handle.borrow_mut() = Some(interval);
}

/// Play a CSS animation on `<body>` when the key sequence is typed.
pub fn init_sequence_effect(document: &Document, config: &SequenceConfig) -> Result<(), String> {
    if !config.enabled {
        return Ok(());
    }
    let Some(body) = document.body() else {
        return Ok(());
    };

    let mut detector = SequenceDetector::new(config.keys.clone());
    let animation = config.animation.clone();
    let duration_ms = config.duration_ms;
    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if !detector.push(&event.key()) {
            return;
        }
        log::info!("key sequence completed");
        let style = body.style();
        let _ = style.set_property("animation", &animation);
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            let _ = style.set_property("animation", "");
        });
    }) as Box<dyn FnMut(KeyboardEvent)>);

    listen(document, "keydown", on_key, false)
}

/// Write the two styled banner lines to the developer console.
pub fn print_banner() {
    web_sys::console::log_3(
        &JsValue::from_str(BANNER),
        &JsValue::from_str(BANNER_TITLE_STYLE),
        &JsValue::from_str(BANNER_TAGLINE_STYLE),
    );
    web_sys::console::log_2(&JsValue::from_str(CREDITS), &JsValue::from_str(CREDITS_STYLE));
}

/// Observe `elements` and run `action` once for each, the first time it
/// becomes visible. The element is unobserved before `action` runs.
fn watch_once<F>(
    elements: Vec<Element>,
    options: &ObserveOptions,
    mut action: F,
) -> Result<(), String>
where
    F: FnMut(&Element) + 'static,
{
    if elements.is_empty() {
        return Ok(());
    }

    let mut tracker = VisibilityObserver::new(options.clone());
    let watched: Vec<(WatchId, Element)> =
        elements.into_iter().map(|e| (tracker.observe(), e)).collect();
    let targets: Vec<Element> = watched.iter().map(|(_, e)| e.clone()).collect();

    let on_entries = move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some((id, element)) = watched.iter().find(|(_, e)| *e == target) else {
                continue;
            };
            let visibility = Visibility::new(entry.is_intersecting(), entry.intersection_ratio());
            if tracker.report(*id, visibility) {
                observer.unobserve(element);
                action(element);
            }
        }
        if tracker.is_settled() {
            observer.disconnect();
        }
    };
    let callback = Closure::wrap(Box::new(on_entries) as Box<ObserverCallback>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    init.set_threshold(&JsValue::from_f64(options.threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|_| "Failed to create IntersectionObserver")?;
    for target in &targets {
        observer.observe(target);
    }

    callback.forget();
    Ok(())
}

/// Attach a listener for the rest of the page session.
fn listen<T>(
    target: &EventTarget,
    event: &str,
    callback: Closure<T>,
    passive: bool,
) -> Result<(), String>
where
    T: ?Sized + WasmClosure,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|_| format!("Failed to listen for {}", event))?;
    callback.forget();
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, String> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| format!("Invalid selector: {}", selector))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on { classes.add_1(class) } else { classes.remove_1(class) };
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::{CounterText, FrameTiming};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn append(document: &Document, id: &str, class: &str, text: &str) -> Element {
        let element = document.create_element("div").unwrap();
        element.set_id(id);
        element.set_class_name(class);
        element.set_text_content(Some(text));
        // First in the body so it starts inside the viewport
        let body = document.body().unwrap();
        body.insert_before(&element, body.first_child().as_ref()).unwrap();
        element
    }

    fn has_class(element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    #[wasm_bindgen_test]
    fn test_missing_navbar_is_skipped() {
        let window = web_sys::window().unwrap();
        let config = NavbarConfig {
            id: "navbar-not-on-page".into(),
            ..NavbarConfig::default()
        };
        assert_eq!(init_navbar(&window, &document(), &config), Ok(()));
    }

    #[wasm_bindgen_test]
    fn test_missing_menu_is_skipped() {
        let document = document();
        // Toggle present, menu missing
        let toggle = append(&document, "menu-skip-toggle", "", "");
        let config = MenuConfig {
            toggle_id: "menu-skip-toggle".into(),
            menu_id: "menu-not-on-page".into(),
            ..MenuConfig::default()
        };
        assert_eq!(init_mobile_menu(&document, &config), Ok(()));

        toggle.dyn_ref::<HtmlElement>().unwrap().click();
        assert_eq!(toggle.get_attribute("aria-expanded"), None);
        assert!(!has_class(&toggle, "active"));
        toggle.remove();
    }

    #[wasm_bindgen_test]
    fn test_menu_click_renders_state() {
        let document = document();
        let body = document.body().unwrap();
        let toggle = append(&document, "menu-click-toggle", "", "");
        let menu = append(&document, "menu-click-menu", "", "");
        let link = append(&document, "menu-click-link", "menu-click-link", "Pricing");
        let config = MenuConfig {
            toggle_id: "menu-click-toggle".into(),
            menu_id: "menu-click-menu".into(),
            link_selector: ".menu-click-link".into(),
            ..MenuConfig::default()
        };
        init_mobile_menu(&document, &config).unwrap();

        toggle.dyn_ref::<HtmlElement>().unwrap().click();
        assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
        assert!(has_class(&toggle, "active"));
        assert!(has_class(&menu, "active"));
        assert!(has_class(&body, "menu-open"));

        link.dyn_ref::<HtmlElement>().unwrap().click();
        assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
        assert!(!has_class(&toggle, "active"));
        assert!(!has_class(&menu, "active"));
        assert!(!has_class(&body, "menu-open"));

        for element in [toggle, menu, link] {
            element.remove();
        }
    }

    #[wasm_bindgen_test]
    fn test_menu_escape_closes() {
        let document = document();
        let view = MenuView {
            toggle: append(&document, "menu-key-toggle", "", ""),
            menu: append(&document, "menu-key-menu", "", ""),
            body: document.body(),
            active_class: "active".into(),
            body_open_class: "menu-open".into(),
            state: RefCell::new(MenuToggle::new()),
        };

        // Escape on a closed menu leaves the DOM untouched
        view.handle_key("Escape");
        assert_eq!(view.toggle.get_attribute("aria-expanded"), None);

        view.toggle();
        assert_eq!(view.toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
        view.handle_key("Enter");
        assert!(has_class(&view.menu, "active"));

        view.handle_key("Escape");
        assert_eq!(view.toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
        assert!(!has_class(&view.toggle, "active"));
        assert!(!has_class(&view.menu, "active"));
        assert!(!has_class(view.body.as_ref().unwrap(), "menu-open"));

        view.toggle.remove();
        view.menu.remove();
    }

    #[wasm_bindgen_test]
    async fn test_counters_animate_or_keep_text() {
        let document = document();
        let stat = append(&document, "counter-stat", "counter-test", "24K");
        let label = append(&document, "counter-label", "counter-test", "Unlimited");
        let config = CounterConfig {
            selector: ".counter-test".into(),
            timing: FrameTiming::new(100, 60),
            ..CounterConfig::default()
        };
        init_counter_animation(&document, &config).unwrap();

        TimeoutFuture::new(1_000).await;
        assert_eq!(stat.text_content().as_deref(), Some("24K"));
        assert_eq!(label.text_content().as_deref(), Some("Unlimited"));

        stat.remove();
        label.remove();
    }

    #[wasm_bindgen_test]
    async fn test_animate_counter_writes_final_text() {
        let document = document();
        let element = append(&document, "counter-direct", "", "");
        let target = CounterText::new("₹", 500, "K+");
        animate_counter(element.clone(), CounterAnimation::new(target, FrameTiming::new(100, 60)));

        TimeoutFuture::new(500).await;
        assert_eq!(element.text_content().as_deref(), Some("₹500K+"));
        element.remove();
    }
}
