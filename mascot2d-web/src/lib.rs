#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use mascot2d::{
        Gesture, GestureKind, GestureTarget, PageData, Stage, StageEvent, StageListener, Viewport,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_futures::spawn_local;

    const PAGE_CONFIG_URL: &str = "assets/mascots.json";
    const FOOTER_URL: &str = "components/footer.html";
    const FOOTER_PLACEHOLDER_ID: &str = "footer-placeholder";
    const FALLBACK_FOOTER: &str =
        r#"<footer class="site-footer"><p>&copy; Greenfield Farm Supplies</p></footer>"#;

    const HERO_SELECTOR: &str = r#"section[class*="hero"]"#;

    const STYLE_ELEMENT_ID: &str = "mascot2d-style";
    /// Base positioning for overlay elements this crate creates itself.
    /// Mascots already present in the page markup keep the site's own CSS.
    const BASE_STYLE: &str =
        "[data-mascot2d-overlay]{position:fixed;bottom:1rem;right:1rem;z-index:999;}";

    /// Applies navigation intents by assigning `location.href`, matching the
    /// click-to-visit behavior of the mascot cards.
    struct Navigator;

    impl StageListener for Navigator {
        fn on_event(&mut self, event: &StageEvent) {
            let StageEvent::Navigate { mascot, target } = event else {
                return;
            };
            log::info!("navigating to {target} via {mascot}");
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_href(target) {
                log::warn!("navigation to {target} failed: {e:?}");
            }
        }
    }

    struct Host {
        stage: Stage,
        /// Overlay element per mascot, keyed by mascot name.
        elements: Vec<(String, web_sys::Element)>,
        last_ts_ms: Option<f64>,
        disposed: bool,
    }

    impl Host {
        fn sync_classes(&self) {
            for (name, element) in &self.elements {
                let Some(actor) = self.stage.actor(name) else {
                    continue;
                };
                let classes = actor
                    .classes()
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                if element.class_name() != classes {
                    element.set_class_name(&classes);
                }
            }
        }
    }

    type AttachedListener = (
        web_sys::EventTarget,
        &'static str,
        Closure<dyn FnMut(web_sys::Event)>,
    );

    /// Handle for one mounted page of mascots. Dropping it keeps the overlay
    /// alive; call [`MascotOverlay::dispose`] to detach all DOM listeners and
    /// remove the mascots' visual output.
    #[wasm_bindgen]
    pub struct MascotOverlay {
        host: Rc<RefCell<Host>>,
        listeners: Rc<RefCell<Vec<AttachedListener>>>,
    }

    #[wasm_bindgen]
    impl MascotOverlay {
        pub fn dispose(&self) {
            for (target, name, closure) in self.listeners.borrow_mut().drain(..) {
                if let Err(e) =
                    target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                {
                    log::warn!("detaching {name} listener failed: {e:?}");
                }
            }
            let mut host = self.host.borrow_mut();
            if host.disposed {
                return;
            }
            host.stage.dispose();
            host.disposed = true;
            host.sync_classes();
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        spawn_local(async {
            match run().await {
                // The page-lifetime overlay is intentionally leaked; the
                // browser reclaims it on navigation.
                Ok(overlay) => std::mem::forget(overlay),
                Err(e) => log::error!("mascot2d-web init failed: {e:?}"),
            }
        });

        Ok(())
    }

    /// Mounts mascots from a JSON page configuration string. Exposed so host
    /// pages can drive the overlay from their own config instead of the
    /// default `assets/mascots.json`.
    #[wasm_bindgen]
    pub fn mount_page(config_json: &str) -> Result<MascotOverlay, JsValue> {
        let page = PageData::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        mount(page)
    }

    async fn run() -> Result<MascotOverlay, JsValue> {
        let document = document()?;
        load_footer(&document).await;

        let page = match load_page_config().await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("falling back to the embedded demo page: {e:?}");
                PageData::from_json_str(DEMO_PAGE)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            }
        };
        mount(page)
    }

    fn mount(page: PageData) -> Result<MascotOverlay, JsValue> {
        let window = window()?;
        let document = document()?;

        inject_stylesheet(&document)?;

        let view = read_viewport(&window, &document);
        let mut stage =
            Stage::new(&page, &view).map_err(|e| JsValue::from_str(&e.to_string()))?;
        stage.set_listener(Navigator);

        let mut elements = Vec::with_capacity(page.mascots.len());
        for entry in &page.mascots {
            let element = overlay_element(&document, &entry.mascot.base_class)?;
            elements.push((entry.mascot.name.clone(), element));
        }

        let host = Rc::new(RefCell::new(Host {
            stage,
            elements,
            last_ts_ms: None,
            disposed: false,
        }));
        host.borrow().sync_classes();

        let listeners = Rc::new(RefCell::new(Vec::new()));
        attach_listeners(&window, &document, &host, &listeners)?;
        start_frame_loop(&window, &document, host.clone())?;

        Ok(MascotOverlay { host, listeners })
    }

    fn attach_listeners(
        window: &web_sys::Window,
        document: &web_sys::Document,
        host: &Rc<RefCell<Host>>,
        listeners: &Rc<RefCell<Vec<AttachedListener>>>,
    ) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let window = window.clone();
            attach(
                listeners,
                window.clone().into(),
                "scroll",
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let Ok(mut host) = host.try_borrow_mut() else {
                        return;
                    };
                    let scroll_top = window.page_y_offset().unwrap_or(0.0) as f32;
                    host.stage.push_scroll(scroll_top);
                }) as Box<dyn FnMut(_)>),
            )?;
        }

        {
            let host = host.clone();
            let window_for_cb = window.clone();
            let document_for_cb = document.clone();
            attach(
                listeners,
                window.clone().into(),
                "resize",
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let Ok(mut host) = host.try_borrow_mut() else {
                        return;
                    };
                    let view = read_viewport(&window_for_cb, &document_for_cb);
                    host.stage.resize(&view);
                    host.sync_classes();
                }) as Box<dyn FnMut(_)>),
            )?;
        }

        for (name, kind) in [
            ("mouseover", GestureKind::Hover),
            ("click", GestureKind::Click),
            ("focusin", GestureKind::FocusIn),
            ("focusout", GestureKind::FocusOut),
        ] {
            let host = host.clone();
            attach(
                listeners,
                document.clone().into(),
                name,
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    let Some(target) = e.target() else {
                        return;
                    };
                    let Ok(element) = target.dyn_into::<web_sys::Element>() else {
                        return;
                    };
                    let Ok(mut host) = host.try_borrow_mut() else {
                        return;
                    };
                    let gesture = Gesture::new(kind, gesture_path(element));
                    host.stage.handle_gesture(&gesture);
                    host.sync_classes();
                }) as Box<dyn FnMut(_)>),
            )?;
        }

        Ok(())
    }

    fn attach(
        listeners: &Rc<RefCell<Vec<AttachedListener>>>,
        target: web_sys::EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        listeners.borrow_mut().push((target, name, closure));
        Ok(())
    }

    fn start_frame_loop(
        window: &web_sys::Window,
        document: &web_sys::Document,
        host: Rc<RefCell<Host>>,
    ) -> Result<(), JsValue> {
        let document = document.clone();
        let raf = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
        let raf2 = raf.clone();
        *raf2.borrow_mut() = Some(Closure::wrap(Box::new(move |ts_ms: f64| {
            {
                let Ok(mut host) = host.try_borrow_mut() else {
                    return;
                };
                if host.disposed {
                    // Let the closure cycle die with the page.
                    return;
                }
                let dt = match host.last_ts_ms {
                    Some(prev) => ((ts_ms - prev) * 0.001).max(0.0) as f32,
                    None => 0.0,
                };
                host.last_ts_ms = Some(ts_ms);

                let Some(window) = web_sys::window() else {
                    return;
                };
                let view = read_viewport(&window, &document);
                host.stage.frame(dt, &view);
                host.sync_classes();
            }

            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.request_animation_frame(
                raf.borrow()
                    .as_ref()
                    .expect("missing closure")
                    .as_ref()
                    .unchecked_ref(),
            ) {
                log::error!("requestAnimationFrame: {e:?}");
            }
        }) as Box<dyn FnMut(f64)>));

        window.request_animation_frame(
            raf2.borrow()
                .as_ref()
                .expect("missing closure")
                .as_ref()
                .unchecked_ref(),
        )?;
        Ok(())
    }

    /// Reads the page's current scroll geometry. The hero region is located
    /// by convention, any `<section>` whose class mentions "hero".
    fn read_viewport(window: &web_sys::Window, document: &web_sys::Document) -> Viewport {
        let scroll_top = window.page_y_offset().unwrap_or(0.0) as f32;
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let scroll_height = document
            .document_element()
            .map(|e| e.scroll_height() as f32)
            .unwrap_or(viewport_height);
        let hero_height = document
            .query_selector(HERO_SELECTOR)
            .ok()
            .flatten()
            .map(|e| e.client_height() as f32);
        Viewport {
            scroll_top,
            scroll_height,
            viewport_height,
            hero_height,
        }
    }

    /// Finds the mascot's overlay element by its base class, creating one at
    /// the end of `<body>` if the page does not carry it in its markup.
    fn overlay_element(
        document: &web_sys::Document,
        base_class: &str,
    ) -> Result<web_sys::Element, JsValue> {
        if let Some(existing) = document.query_selector(&format!(".{base_class}"))? {
            return Ok(existing);
        }
        let element = document.create_element("div")?;
        element.set_class_name(base_class);
        element.set_attribute("data-mascot2d-overlay", "")?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("missing body"))?;
        body.append_child(&element)?;
        Ok(element)
    }

    /// Installs the overlay stylesheet once per document.
    fn inject_stylesheet(document: &web_sys::Document) -> Result<(), JsValue> {
        if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let style = document.create_element("style")?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(BASE_STYLE));
        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("missing head"))?;
        head.append_child(&style)?;
        Ok(())
    }

    /// Converts a DOM event target and its ancestor chain into the runtime's
    /// host-agnostic gesture path.
    fn gesture_path(target: web_sys::Element) -> Vec<GestureTarget> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(element) = current {
            let mut t = GestureTarget::new(&element.tag_name());
            let id = element.id();
            if !id.is_empty() {
                t = t.with_id(&id);
            }
            let class_attr = element.class_name();
            let classes = class_attr.split_whitespace().collect::<Vec<_>>();
            if !classes.is_empty() {
                t = t.with_classes(&classes);
            }
            let attrs = element.attributes();
            for i in 0..attrs.length() {
                let Some(attr) = attrs.item(i) else { continue };
                let name = attr.name();
                if name != "class" && name != "id" {
                    t = t.with_attr(&name, &attr.value());
                }
            }
            path.push(t);
            current = element.parent_element();
        }
        path
    }

    /// Injects the shared footer into `#footer-placeholder` and announces it
    /// with a `footerLoaded` event, so page scripts can bind to its links.
    /// Pages without the placeholder skip the footer entirely.
    async fn load_footer(document: &web_sys::Document) {
        let Some(placeholder) = document.get_element_by_id(FOOTER_PLACEHOLDER_ID) else {
            log::warn!("no #{FOOTER_PLACEHOLDER_ID} on this page, skipping footer");
            return;
        };
        match fetch_text(FOOTER_URL).await {
            Ok(html) => {
                placeholder.set_inner_html(&html);
                match web_sys::CustomEvent::new("footerLoaded") {
                    Ok(event) => {
                        let _ = document.dispatch_event(&event);
                    }
                    Err(e) => log::warn!("footerLoaded event failed: {e:?}"),
                }
            }
            Err(e) => {
                log::warn!("fetching {FOOTER_URL} failed: {e:?}, using the inline fallback");
                placeholder.set_inner_html(FALLBACK_FOOTER);
            }
        }
    }

    async fn load_page_config() -> Result<PageData, JsValue> {
        let text = fetch_text(PAGE_CONFIG_URL).await?;
        PageData::from_json_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    const DEMO_PAGE: &str = r#"
{
  "name": "demo",
  "mascots": [
    {
      "name": "pig",
      "greeting": "wave",
      "reactions": [
        { "name": "wave", "duration": 1.5, "selectors": ".pig-animation" },
        { "name": "jump", "duration": 2.0, "selectors": ".team-member, [class*=\"team\"]" }
      ]
    }
  ]
}
"#;

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))
    }

    fn document() -> Result<web_sys::Document, JsValue> {
        window()?
            .document()
            .ok_or_else(|| JsValue::from_str("missing document"))
    }

    async fn fetch_text(path: &str) -> Result<String, JsValue> {
        let window = window()?;
        let resp = JsFuture::from(window.fetch_with_str(path)).await?;
        let resp: web_sys::Response = resp.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "fetch {path}: HTTP {}",
                resp.status()
            )));
        }

        let ab = JsFuture::from(resp.array_buffer()?).await?;
        let u8 = js_sys::Uint8Array::new(&ab);
        let text =
            String::from_utf8(u8.to_vec()).map_err(|e| JsValue::from_str(&format!("{e:?}")))?;
        Ok(text)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod web {
    // This crate is intended to be built via Trunk for `wasm32-unknown-unknown`.
    // Keep a tiny native stub so `cargo test` for the workspace stays green.
}
