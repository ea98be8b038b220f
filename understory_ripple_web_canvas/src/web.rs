// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::f64::consts::TAU;
use core::fmt;
use core::time::Duration;

use kurbo::{Circle, Point, Rect};
use peniko::Color;
use understory_gesture::classify::{GestureGroup, PointerCoords, RawEvent, classify};
use understory_ripple::schedule::{FrameId, FrameScheduler, TimerId, TimerScheduler};
use understory_ripple::{Ripple, RippleConfig, RippleHost, RippleSurface};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlElement, MouseEvent, Performance,
    TouchEvent, Window,
};

use crate::{CANVAS_CLASS, TARGET_CLASS};

fn color_to_css(color: Color) -> String {
    // `Rgba8` formats as a CSS `rgb(...)`/`rgba(...)` string.
    color.to_rgba8().to_string()
}

fn js_error(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

/// [`RippleSurface`] backed by a `<canvas>` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Wrap `canvas`, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// The wrapped canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RippleSurface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Assigning the backing size also resets the context transform.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_scale(&mut self, scale: f64) {
        if let Err(err) = self.ctx.scale(scale, scale) {
            log::warn!("canvas scale failed: {err:?}");
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.ctx.begin_path();
        if let Err(err) = self
            .ctx
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
        {
            log::warn!("canvas arc failed: {err:?}");
            return;
        }
        self.ctx.set_fill_style_str(&color_to_css(color));
        self.ctx.fill();
    }
}

/// Browser callbacks shared by every request; created once per attachment.
struct Callbacks {
    frame: Closure<dyn FnMut(f64)>,
    timer: Closure<dyn FnMut(JsValue)>,
}

/// [`RippleHost`] over a live DOM container.
struct WebHost {
    window: Window,
    performance: Performance,
    container: HtmlElement,
    surface: CanvasSurface,
    callbacks: Option<Callbacks>,
    /// Frame handed out to the ripple and not yet delivered.
    pending_frame: Option<FrameId>,
    /// Ripple timer ids paired with browser timeout handles.
    timers: Vec<(TimerId, i32)>,
    next_timer: u64,
}

impl FrameScheduler for WebHost {
    fn request_frame(&mut self) -> Option<FrameId> {
        let callbacks = self.callbacks.as_ref()?;
        match self
            .window
            .request_animation_frame(callbacks.frame.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                let id = FrameId(u64::from(handle.unsigned_abs()));
                self.pending_frame = Some(id);
                Some(id)
            }
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending_frame == Some(id) {
            self.pending_frame = None;
        }
        if let Ok(handle) = i32::try_from(id.0)
            && let Err(err) = self.window.cancel_animation_frame(handle)
        {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
    }
}

impl TimerScheduler for WebHost {
    fn set_timer(&mut self, delay: Duration) -> Option<TimerId> {
        let callbacks = self.callbacks.as_ref()?;
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        #[allow(clippy::cast_precision_loss, reason = "timer ids stay far below 2^53")]
        let arg = JsValue::from_f64(id.0 as f64);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
            callbacks.timer.as_ref().unchecked_ref(),
            timeout,
            &arg,
        ) {
            Ok(handle) => {
                self.timers.push((id, handle));
                Some(id)
            }
            Err(err) => {
                log::warn!("setTimeout failed: {err:?}");
                None
            }
        }
    }

    fn cancel_timer(&mut self, id: TimerId) {
        if let Some(pos) = self.timers.iter().position(|(t, _)| *t == id) {
            let (_, handle) = self.timers.swap_remove(pos);
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl RippleHost for WebHost {
    type Surface = CanvasSurface;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative milliseconds; sub-millisecond precision is dropped"
    )]
    fn now_ms(&self) -> u64 {
        self.performance.now() as u64
    }

    fn bounds(&self) -> Rect {
        let r = self.container.get_bounding_client_rect();
        Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height()))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn container_disabled(&self) -> bool {
        self.container.has_attribute("disabled")
    }

    fn surface(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }
}

struct Shared {
    ripple: Ripple,
    host: WebHost,
}

fn coords(page_x: i32, page_y: i32, client_x: i32, client_y: i32) -> PointerCoords {
    PointerCoords {
        page: Point::new(f64::from(page_x), f64::from(page_y)),
        client: Point::new(f64::from(client_x), f64::from(client_y)),
    }
}

/// Convert a DOM event and feed it to `ripple`.
fn dispatch(shared: &mut Shared, event: &Event) {
    let event_type = event.type_();
    let Shared { ripple, host } = shared;
    let touch = classify(&event_type).is_some_and(|c| c.group == GestureGroup::Touch);
    if touch {
        let touch_event: &TouchEvent = event.unchecked_ref();
        let touches: Vec<PointerCoords> = touch_event
            .changed_touches()
            .item(0)
            .map(|t| coords(t.page_x(), t.page_y(), t.client_x(), t.client_y()))
            .into_iter()
            .collect();
        ripple.handle_event(host, &RawEvent::touches(&event_type, &touches));
    } else if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        let at = coords(
            mouse.page_x(),
            mouse.page_y(),
            mouse.client_x(),
            mouse.client_y(),
        );
        ripple.handle_event(host, &RawEvent::direct(&event_type, at));
    } else {
        ripple.handle_event(host, &RawEvent::touches(&event_type, &[]));
    }
}

fn prepare_container(window: &Window, container: &HtmlElement) -> Result<(), JsValue> {
    if let Some(style) = window.get_computed_style(container)?
        && style.get_property_value("position")? == "static"
    {
        container.style().set_property("position", "relative")?;
    }
    container.class_list().add_1(TARGET_CLASS)
}

fn create_canvas(window: &Window) -> Result<HtmlCanvasElement, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| js_error("no document"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_class_name(CANVAS_CLASS);
    let style = canvas.style();
    for (name, value) in [
        ("position", "absolute"),
        ("left", "0"),
        ("top", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
    ] {
        style.set_property(name, value)?;
    }
    Ok(canvas)
}

/// A ripple attached to a DOM element.
///
/// Detaches itself when dropped.
pub struct WebRipple {
    shared: Rc<RefCell<Shared>>,
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl fmt::Debug for WebRipple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebRipple")
            .field("attached", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl WebRipple {
    /// Attach a ripple with `config` to `container`.
    pub fn attach(container: &HtmlElement, config: RippleConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let performance = window
            .performance()
            .ok_or_else(|| js_error("no performance clock"))?;
        let canvas = create_canvas(&window)?;
        prepare_container(&window, container)?;
        container.append_child(&canvas)?;

        let surface = CanvasSurface::new(canvas.clone())?;
        let shared = Rc::new(RefCell::new(Shared {
            ripple: Ripple::new(config),
            host: WebHost {
                window,
                performance,
                container: container.clone(),
                surface,
                callbacks: None,
                pending_frame: None,
                timers: Vec::new(),
                next_timer: 0,
            },
        }));

        let weak: Weak<RefCell<Shared>> = Rc::downgrade(&shared);
        let frame = Closure::<dyn FnMut(f64)>::new({
            let weak = weak.clone();
            move |_timestamp: f64| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let mut shared = shared.borrow_mut();
                let Shared { ripple, host } = &mut *shared;
                if let Some(id) = host.pending_frame.take() {
                    ripple.on_frame(host, id);
                }
            }
        });
        let timer = Closure::<dyn FnMut(JsValue)>::new({
            let weak = weak.clone();
            move |arg: JsValue| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let Some(raw) = arg.as_f64() else {
                    return;
                };
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "round-trips the integral id passed to setTimeout"
                )]
                let id = TimerId(raw as u64);
                let mut shared = shared.borrow_mut();
                let Shared { ripple, host } = &mut *shared;
                host.timers.retain(|(t, _)| *t != id);
                ripple.on_timer(host, id);
            }
        });
        shared.borrow_mut().host.callbacks = Some(Callbacks { frame, timer });

        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(shared) = weak.upgrade() {
                dispatch(&mut shared.borrow_mut(), &event);
            }
        });
        for name in Ripple::event_types() {
            container.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        }
        log::debug!("ripple attached");

        Ok(Self {
            shared,
            container: container.clone(),
            canvas,
            listener: Some(listener),
        })
    }

    /// Replace the configuration; applies from the next tap.
    pub fn set_config(&self, config: RippleConfig) {
        self.shared.borrow_mut().ripple.set_config(config);
    }

    /// Whether a wave is currently animating.
    pub fn is_animating(&self) -> bool {
        self.shared.borrow().ripple.is_animating()
    }

    /// Tear the ripple down. Idempotent; also runs on drop.
    pub fn detach(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        {
            let mut shared = self.shared.borrow_mut();
            let Shared { ripple, host } = &mut *shared;
            ripple.teardown(host);
            host.callbacks = None;
        }
        for name in Ripple::event_types() {
            if let Err(err) = self
                .container
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                log::warn!("removing `{name}` listener failed: {err:?}");
            }
        }
        if let Err(err) = self.container.class_list().remove_1(TARGET_CLASS) {
            log::warn!("removing container class failed: {err:?}");
        }
        self.canvas.remove();
        log::debug!("ripple detached");
    }
}

impl Drop for WebRipple {
    fn drop(&mut self) {
        self.detach();
    }
}
