use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::StateSnapshot;

use super::perf_stats::PerfStats;
use super::SimulationCore;

type TickCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Mounted {
    core: SimulationCore,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    on_state: Option<js_sys::Function>,
    raf_id: Option<i32>,
    running: bool,
}

fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn request_frame(tick: &TickCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let borrowed = tick.borrow();
    let callback = borrowed.as_ref()?;
    window.request_animation_frame(callback.as_ref().unchecked_ref()).ok()
}

fn snapshot_to_js(snapshot: &StateSnapshot) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(snapshot).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn publish(callback: &js_sys::Function, snapshot: &StateSnapshot) {
    let result = snapshot_to_js(snapshot).and_then(|value| callback.call1(&JsValue::NULL, &value));
    if let Err(err) = result {
        web_sys::console::error_2(&"sand battery: state callback failed".into(), &err);
    }
}

/// Browser handle: owns the core, the canvas, and the animation frame loop
#[wasm_bindgen]
pub struct SandBattery {
    inner: Rc<RefCell<Mounted>>,
    tick: TickCallback,
}

#[wasm_bindgen]
impl SandBattery {
    /// Attach to a canvas. `config_json` overrides any subset of the tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<SandBattery, JsValue> {
        let core = match config_json.as_deref() {
            Some(json) => SimulationCore::from_config_json(json),
            None => SimulationCore::with_defaults(),
        }
        .map_err(|e| {
            log(&format!("sand battery: {e}"));
            JsValue::from_str(&e.to_string())
        })?;

        Ok(SandBattery {
            inner: Rc::new(RefCell::new(Mounted {
                core,
                canvas,
                ctx: None,
                on_state: None,
                raf_id: None,
                running: false,
            })),
            tick: Rc::new(RefCell::new(None)),
        })
    }

    /// Start (or restart) the frame loop. Re-primes the particle pool for
    /// the current viewport and resets the frame clock.
    pub fn mount(&mut self) {
        let viewport_width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::INFINITY);

        {
            let mut m = self.inner.borrow_mut();
            if m.running {
                return;
            }
            m.core.mount(viewport_width);
            let ctx = context_2d(&m.canvas);
            m.ctx = ctx;
            m.running = true;
        }

        self.ensure_tick();
        let id = request_frame(&self.tick);
        self.inner.borrow_mut().raf_id = id;
        log(&format!("sand battery: mounted ({viewport_width}px)"));
    }

    /// Stop the loop and cancel the pending frame request
    pub fn unmount(&mut self) {
        let mut m = self.inner.borrow_mut();
        m.running = false;
        if let (Some(id), Some(window)) = (m.raf_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        log("sand battery: unmounted");
    }

    /// Called with a plain state object at most every publish interval
    pub fn set_on_state(&mut self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().on_state = callback;
    }

    pub fn start_charging(&mut self) {
        self.inner.borrow_mut().core.start_charging();
    }

    pub fn start_discharging(&mut self) {
        self.inner.borrow_mut().core.start_discharging();
    }

    pub fn stop(&mut self) {
        self.inner.borrow_mut().core.stop();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        snapshot_to_js(&self.inner.borrow().core.snapshot())
    }

    #[wasm_bindgen(getter)]
    pub fn operational_state(&self) -> String {
        self.inner.borrow().core.state().operational_state.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn current_temperature(&self) -> f64 {
        self.inner.borrow().core.state().current_temperature
    }

    #[wasm_bindgen(getter)]
    pub fn output_temperature(&self) -> f64 {
        self.inner.borrow().core.state().output_temperature
    }

    #[wasm_bindgen(getter)]
    pub fn can_discharge(&self) -> bool {
        self.inner.borrow().core.can_discharge()
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.inner.borrow_mut().core.enable_perf_metrics(enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.inner.borrow().core.get_perf_stats()
    }
}

impl SandBattery {
    fn ensure_tick(&self) {
        if self.tick.borrow().is_some() {
            return;
        }

        let inner = self.inner.clone();
        let tick = self.tick.clone();
        let callback = Closure::wrap(Box::new(move |now_ms: f64| {
            let (snapshot, on_state) = {
                let mut guard = inner.borrow_mut();
                let m = &mut *guard;
                if !m.running {
                    return;
                }

                let snapshot = match m.ctx.as_mut() {
                    Some(ctx) => {
                        let width = f64::from(m.canvas.width());
                        let height = f64::from(m.canvas.height());
                        m.core.frame_on(now_ms, ctx, width, height)
                    }
                    None => {
                        m.core.skip_frame(now_ms);
                        m.ctx = context_2d(&m.canvas);
                        None
                    }
                };

                m.raf_id = request_frame(&tick);
                (snapshot, m.on_state.clone())
            };

            // outside the borrow: the host may call back into the engine
            if let (Some(snapshot), Some(on_state)) = (snapshot, on_state) {
                publish(&on_state, &snapshot);
            }
        }) as Box<dyn FnMut(f64)>);

        *self.tick.borrow_mut() = Some(callback);
    }
}

impl Drop for SandBattery {
    fn drop(&mut self) {
        if let Ok(mut m) = self.inner.try_borrow_mut() {
            m.running = false;
            if let (Some(id), Some(window)) = (m.raf_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // break the closure <-> handle cycle
        if let Ok(mut tick) = self.tick.try_borrow_mut() {
            tick.take();
        }
    }
}
