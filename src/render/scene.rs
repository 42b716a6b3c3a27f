//! Layered scene painter
//!
//! Back to front: background grid, inlet pipe, shell, insulation, sand core,
//! heating rods, internal pipe, outlet pipe, fan, airflow particles, heat
//! shimmer, HUD card. Every layer reads the frame view and nothing else.

use std::f64::consts::TAU;

use rand::Rng;

use crate::domain::{
    particle_temperature_to_color, temperature_to_color, Layout, OperationalState, Rgb, Rgba,
    SimulationState,
};
use crate::systems::geometry::pipe_position;
use crate::systems::Particle;

use super::surface::{GradientStop, LineCap, LineJoin, Paint, Surface, TextAlign};

const BACKGROUND: Rgb = Rgb::from_hex(0xF3F4F6);
const GRID_LINE: Rgb = Rgb::from_hex(0xE5E7EB);
const GRID_SIZE: f64 = 40.0;

const PIPE_WIDTH: f64 = 36.0;
const ROD_COUNT: usize = 8;
const ROD_WIDTH: f64 = 12.0;
const FAN_BLADES: usize = 4;
const INTERNAL_PIPE_STEP: f64 = 0.002;

const SPECKLE_SPACING: f64 = 15.0;
const SPECKLE_JITTER: f64 = 5.0;
const SPECKLE_RADIUS: f64 = 2.0;

const FONT_LABEL: &str = "bold 14px Inter, sans-serif";
const FONT_SMALL: &str = "bold 12px Inter, sans-serif";
const FONT_HUD: &str = "bold 52px Inter, sans-serif";

const WHITE_30: Rgba = Rgba::new(255, 255, 255, 0.3);
const WHITE_90: Rgba = Rgba::new(255, 255, 255, 0.9);
const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

#[inline]
fn solid(hex: u32) -> Paint<'static> {
    Paint::Solid(Rgb::from_hex(hex).into())
}

/// Fixed sand grain texture for the core, jittered once at construction so
/// it does not shimmer from frame to frame.
pub struct SpeckleTexture {
    offsets: Vec<(f64, f64)>,
}

impl SpeckleTexture {
    pub fn generate<R: Rng>(layout: &Layout, rng: &mut R) -> Self {
        let core = layout.core_rect();
        let cols = (core.w / SPECKLE_SPACING).ceil() as usize;
        let rows = (core.h / SPECKLE_SPACING).ceil() as usize;

        let mut offsets = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                let jitter_x = rng.random::<f64>() * SPECKLE_JITTER;
                let jitter_y = rng.random::<f64>() * SPECKLE_JITTER;
                let x = core.x + col as f64 * SPECKLE_SPACING + jitter_x;
                let y = core.y + row as f64 * SPECKLE_SPACING + jitter_y;
                offsets.push((x, y));
            }
        }
        Self { offsets }
    }

    pub fn dots(&self) -> &[(f64, f64)] {
        &self.offsets
    }
}

/// Everything one frame needs, borrowed from the simulation
pub struct FrameView<'a> {
    pub state: &'a SimulationState,
    pub particles: &'a [Particle],
    pub layout: &'a Layout,
    pub speckle: &'a SpeckleTexture,
    pub room_temperature: f64,
    pub max_temperature: f64,
    pub fan_rotation: f64,
    /// Frame clock, drives rod pulsing and shimmer waves
    pub time_ms: f64,
}

/// Clear and paint the full scene
pub fn draw_scene<S: Surface + ?Sized>(s: &mut S, view: &FrameView<'_>, width: f64, height: f64) {
    let state = view.state;

    s.clear_rect(0.0, 0.0, width, height);
    draw_background(s, width, height);
    draw_inlet_pipe(s, view.layout, view.room_temperature);
    draw_battery_shell(s, view.layout);
    draw_insulation(s, view.layout);
    draw_sand_core(s, view.layout, view.speckle, state.current_temperature);
    draw_heating_rods(
        s,
        view.layout,
        state.current_temperature,
        view.max_temperature,
        state.is_heating,
        view.time_ms,
    );
    draw_internal_pipe(s, view.layout, state.current_temperature);
    draw_outlet_pipe(s, view.layout, state.output_temperature);
    draw_fan(s, view.layout, state.is_fan_running, view.fan_rotation);
    draw_air_particles(s, state, view.particles);
    draw_heat_shimmer(s, view.layout, state, view.time_ms);
    draw_hud(s, state);
}

pub fn draw_background<S: Surface + ?Sized>(s: &mut S, width: f64, height: f64) {
    s.set_fill(Paint::Solid(BACKGROUND.into()));
    s.fill_rect(0.0, 0.0, width, height);

    s.set_stroke(Paint::Solid(GRID_LINE.into()));
    s.set_line_width(1.0);
    s.begin_path();
    let mut x = 0.0;
    while x < width {
        s.move_to(x, 0.0);
        s.line_to(x, height);
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y < height {
        s.move_to(0.0, y);
        s.line_to(width, y);
        y += GRID_SIZE;
    }
    s.stroke();
}

fn draw_flow_arrow<S: Surface + ?Sized>(s: &mut S, tip_x: f64, y: f64, back_x: f64) {
    s.set_fill(Paint::Solid(WHITE_90));
    s.begin_path();
    s.move_to(back_x, y - 10.0);
    s.line_to(tip_x, y);
    s.line_to(back_x, y + 10.0);
    s.fill();
}

pub fn draw_inlet_pipe<S: Surface + ?Sized>(s: &mut S, layout: &Layout, room_temperature: f64) {
    let start_x = layout.inlet_start_x();
    let end_x = start_x + layout.pipe_length;
    let y = layout.inlet_pipe_y;

    s.set_fill(solid(0x60A5FA));
    s.fill_rect(start_x, y - PIPE_WIDTH / 2.0, layout.pipe_length, PIPE_WIDTH);
    s.set_fill(Paint::Solid(WHITE_30));
    s.fill_rect(start_x, y - PIPE_WIDTH / 2.0, layout.pipe_length, 8.0);

    draw_flow_arrow(s, end_x - 5.0, y, end_x - 20.0);

    s.set_fill(solid(0x1E3A8A));
    s.set_font(FONT_LABEL);
    s.set_text_align(TextAlign::Center);
    let label = format!("{}°C IN", room_temperature.round());
    s.fill_text(&label, start_x + layout.pipe_length / 2.0, y - 30.0);
}

pub fn draw_battery_shell<S: Surface + ?Sized>(s: &mut S, layout: &Layout) {
    let r = layout.shell_rect();
    let stops: [GradientStop; 5] = [
        (0.0, Rgb::from_hex(0xD1D5DB).into()),
        (0.2, Rgb::from_hex(0xF3F4F6).into()),
        (0.5, Rgb::from_hex(0xE5E7EB).into()),
        (0.8, Rgb::from_hex(0xD1D5DB).into()),
        (1.0, Rgb::from_hex(0x9CA3AF).into()),
    ];
    s.set_fill(Paint::Linear { x0: r.x, y0: r.y, x1: r.x + r.w, y1: r.y, stops: &stops });
    s.fill_rect(r.x, r.y, r.w, r.h);

    s.set_stroke(solid(0x6B7280));
    s.set_line_width(2.0);
    s.stroke_rect(r.x, r.y, r.w, r.h);
}

pub fn draw_insulation<S: Surface + ?Sized>(s: &mut S, layout: &Layout) {
    let r = layout.insulation_rect();
    s.set_fill(solid(0xFEF3C7));
    s.fill_rect(r.x, r.y, r.w, r.h);
    s.set_stroke(solid(0xD97706));
    s.set_line_width(2.0);
    s.stroke_rect(r.x, r.y, r.w, r.h);
}

pub fn draw_sand_core<S: Surface + ?Sized>(
    s: &mut S,
    layout: &Layout,
    speckle: &SpeckleTexture,
    temperature: f64,
) {
    let r = layout.core_rect();
    let (cx, cy) = (layout.center_x, layout.center_y);

    let stops: [GradientStop; 3] = [
        (0.0, temperature_to_color(temperature).into()),
        (0.7, temperature_to_color(temperature * 0.8).into()),
        (1.0, temperature_to_color(temperature * 0.6).into()),
    ];
    s.set_fill(Paint::Radial {
        x0: cx,
        y0: cy,
        r0: 0.0,
        x1: cx,
        y1: cy,
        r1: r.w.max(r.h) / 2.0,
        stops: &stops,
    });
    s.fill_rect(r.x, r.y, r.w, r.h);

    s.set_fill(Paint::Solid(Rgba::new(0, 0, 0, 0.05 + temperature / 6000.0)));
    for &(x, y) in speckle.dots() {
        s.fill_circle(x, y, SPECKLE_RADIUS);
    }

    // border darkens as the sand heats
    s.set_stroke(Paint::Solid(Rgba::new(0, 0, 0, 0.1 + temperature / 3000.0)));
    s.set_line_width(2.0);
    s.stroke_rect(r.x, r.y, r.w, r.h);
}

/// Rod glow strength: pulses while heating, otherwise residual heat only
pub fn rod_glow_intensity(
    temperature: f64,
    max_temperature: f64,
    is_heating: bool,
    time_ms: f64,
) -> f64 {
    let heat = temperature / max_temperature;
    if is_heating {
        0.6 + heat * 0.4 + (time_ms / 200.0).sin() * 0.1
    } else {
        heat * 0.3
    }
}

/// Rod body gradient: red when hot and powered, amber when warm or powered, gray otherwise
pub fn rod_stops(temperature: f64, is_heating: bool) -> [GradientStop; 3] {
    let hex = if temperature > 400.0 && is_heating {
        [0xFCA5A5, 0xEF4444, 0xB91C1C]
    } else if temperature > 200.0 || is_heating {
        [0xFDE047, 0xF59E0B, 0xB45309]
    } else {
        [0x9CA3AF, 0x6B7280, 0x4B5563]
    };
    [
        (0.0, Rgb::from_hex(hex[0]).into()),
        (0.5, Rgb::from_hex(hex[1]).into()),
        (1.0, Rgb::from_hex(hex[2]).into()),
    ]
}

pub fn draw_heating_rods<S: Surface + ?Sized>(
    s: &mut S,
    layout: &Layout,
    temperature: f64,
    max_temperature: f64,
    is_heating: bool,
    time_ms: f64,
) {
    let core = layout.core_rect();
    let cy = layout.center_y;
    let spacing = core.w / (ROD_COUNT as f64 + 1.0);
    let glow = rod_glow_intensity(temperature, max_temperature, is_heating, time_ms);
    let body = rod_stops(temperature, is_heating);

    let glow_base = if temperature > 300.0 {
        Rgb::from_hex(0xEF4444)
    } else {
        Rgb::from_hex(0xF59E0B)
    };
    let glow_stops: [GradientStop; 2] =
        [(0.0, glow_base.with_alpha(glow * 0.6)), (1.0, TRANSPARENT)];

    for i in 1..=ROD_COUNT {
        let rod_x = core.x + spacing * i as f64 - ROD_WIDTH / 2.0;
        let mid_x = rod_x + ROD_WIDTH / 2.0;

        if glow > 0.1 {
            s.set_fill(Paint::Radial {
                x0: mid_x,
                y0: cy,
                r0: 0.0,
                x1: mid_x,
                y1: cy,
                r1: ROD_WIDTH * 5.0,
                stops: &glow_stops,
            });
            s.fill_rect(rod_x - ROD_WIDTH * 4.0, cy - core.h / 2.0, ROD_WIDTH * 9.0, core.h);
        }

        s.set_fill(Paint::Linear {
            x0: rod_x,
            y0: core.y,
            x1: rod_x,
            y1: core.y + core.h,
            stops: &body,
        });
        s.fill_rect(rod_x, core.y, ROD_WIDTH, core.h);

        s.set_fill(Paint::Solid(Rgba::new(255, 255, 255, 0.4)));
        s.fill_rect(rod_x + 2.0, core.y, 3.0, core.h);
    }
}

pub fn draw_internal_pipe<S: Surface + ?Sized>(s: &mut S, layout: &Layout, temperature: f64) {
    let steps = (1.0 / INTERNAL_PIPE_STEP).round() as usize;

    s.begin_path();
    for i in 0..=steps {
        let pos = pipe_position(i as f64 * INTERNAL_PIPE_STEP, layout);
        if i == 0 {
            s.move_to(pos.x, pos.y);
        } else {
            s.line_to(pos.x, pos.y);
        }
    }

    s.set_stroke(solid(0x4B5563));
    s.set_line_width(24.0);
    s.set_line_cap(LineCap::Round);
    s.set_line_join(LineJoin::Round);
    s.stroke();

    if temperature > 100.0 {
        s.set_stroke(Paint::Solid(Rgba::new(239, 68, 68, (temperature / 600.0).min(0.6))));
        s.set_line_width(26.0);
        s.stroke();
    }

    s.set_stroke(Paint::Solid(Rgba::new(255, 255, 255, 0.2)));
    s.set_line_width(6.0);
    s.stroke();
}

pub fn outlet_pipe_color(output_temperature: f64) -> Rgb {
    if output_temperature > 100.0 {
        Rgb::from_hex(0xEF4444)
    } else if output_temperature > 50.0 {
        Rgb::from_hex(0xF97316)
    } else {
        Rgb::from_hex(0x9CA3AF)
    }
}

pub fn draw_outlet_pipe<S: Surface + ?Sized>(s: &mut S, layout: &Layout, output_temperature: f64) {
    let start_x = layout.outlet_start_x();
    let y = layout.outlet_pipe_y;

    s.set_fill(Paint::Solid(outlet_pipe_color(output_temperature).into()));
    s.fill_rect(start_x, y - PIPE_WIDTH / 2.0, layout.pipe_length, PIPE_WIDTH);
    s.set_fill(Paint::Solid(WHITE_30));
    s.fill_rect(start_x, y - PIPE_WIDTH / 2.0, layout.pipe_length, 8.0);

    draw_flow_arrow(s, start_x + 30.0, y, start_x + 15.0);

    s.set_fill(solid(0x7F1D1D));
    s.set_font(FONT_LABEL);
    s.set_text_align(TextAlign::Center);
    let label = format!("{}°C OUT", output_temperature.round());
    s.fill_text(&label, start_x + layout.pipe_length / 2.0, y - 30.0);
}

pub fn draw_fan<S: Surface + ?Sized>(s: &mut S, layout: &Layout, is_running: bool, rotation: f64) {
    let (fx, fy) = layout.fan_center();
    let radius = layout.fan_radius;

    s.set_fill(solid(0xD1D5DB));
    s.fill_circle(fx, fy, radius + 6.0);
    s.set_fill(solid(0xEBF8FF));
    s.fill_circle(fx, fy, radius);

    s.save();
    s.translate(fx, fy);
    s.rotate(rotation);
    let blade = if is_running { solid(0x60A5FA) } else { solid(0xD1D5DB) };
    for i in 0..FAN_BLADES {
        s.save();
        s.rotate(i as f64 / FAN_BLADES as f64 * TAU);
        s.set_fill(blade);
        s.begin_path();
        s.move_to(0.0, 0.0);
        s.quadratic_curve_to(radius * 0.7, -radius * 0.4, radius * 0.9, 0.0);
        s.quadratic_curve_to(radius * 0.7, radius * 0.4, 0.0, 0.0);
        s.fill();
        s.restore();
    }
    s.restore();

    s.set_fill(solid(0x9CA3AF));
    s.fill_circle(fx, fy, 12.0);
    s.set_fill(solid(0x4B5563));
    s.fill_circle(fx, fy, 6.0);

    s.set_fill(solid(0x374151));
    s.set_font(FONT_SMALL);
    s.set_text_align(TextAlign::Center);
    s.fill_text(if is_running { "FAN ON" } else { "FAN OFF" }, fx, fy + radius + 25.0);
}

pub fn draw_air_particles<S: Surface + ?Sized>(
    s: &mut S,
    state: &SimulationState,
    particles: &[Particle],
) {
    if state.operational_state != OperationalState::Discharging {
        return;
    }

    for p in particles {
        s.set_fill(Paint::Solid(particle_temperature_to_color(p.temperature)));
        s.set_global_alpha(p.remaining_life());
        s.fill_circle(p.x, p.y, p.size);
    }
    s.set_global_alpha(1.0);
}

pub fn draw_heat_shimmer<S: Surface + ?Sized>(
    s: &mut S,
    layout: &Layout,
    state: &SimulationState,
    time_ms: f64,
) {
    if state.operational_state != OperationalState::Discharging || state.output_temperature < 50.0 {
        return;
    }

    let shimmer_x = layout.outlet_start_x() + layout.pipe_length;
    let shimmer_y = layout.outlet_pipe_y;
    let time = time_ms / 150.0;

    s.save();
    for i in 0..4 {
        let fi = f64::from(i);
        let wave_y = shimmer_y + 30.0 + fi * 18.0 + (time + fi).sin() * 8.0;
        let alpha = (1.0 - fi / 4.0) * 0.4;

        s.set_stroke(Paint::Solid(Rgba::new(239, 68, 68, alpha)));
        s.set_line_width(3.0);
        s.begin_path();
        let mut dx = 0.0;
        while dx < 70.0 {
            let y = wave_y + (time * 2.0 + dx / 15.0 + fi).sin() * (4.0 + fi);
            if dx == 0.0 {
                s.move_to(shimmer_x + dx, y);
            } else {
                s.line_to(shimmer_x + dx, y);
            }
            dx += 5.0;
        }
        s.stroke();
    }
    s.restore();
}

/// Big temperature digits: blue while cool, amber when warm, red when hot
pub fn hud_temperature_color(rounded: f64) -> Rgb {
    if rounded < 100.0 {
        Rgb::from_hex(0x3B82F6)
    } else if rounded < 300.0 {
        Rgb::from_hex(0xF59E0B)
    } else {
        Rgb::from_hex(0xEF4444)
    }
}

/// (badge background, badge text)
pub fn badge_colors(state: OperationalState) -> (Rgb, Rgb) {
    match state {
        OperationalState::Charging => (Rgb::from_hex(0xFEF3C7), Rgb::from_hex(0xD97706)),
        OperationalState::Discharging => (Rgb::from_hex(0xDBEAFE), Rgb::from_hex(0x2563EB)),
        OperationalState::Cooling | OperationalState::Stopped => {
            (Rgb::from_hex(0xF3F4F6), Rgb::from_hex(0x6B7280))
        }
    }
}

pub fn draw_hud<S: Surface + ?Sized>(s: &mut S, state: &SimulationState) {
    let temp = state.current_temperature.round();

    s.set_fill(Paint::Solid(Rgba::new(255, 255, 255, 0.95)));
    s.set_shadow(Rgba::new(0, 0, 0, 0.1), 10.0);
    s.rounded_rect_path(50.0, 80.0, 260.0, 140.0, 16.0);
    s.fill();
    s.set_shadow(TRANSPARENT, 0.0);

    s.set_stroke(solid(0xE5E7EB));
    s.set_line_width(2.0);
    s.stroke();

    s.set_fill(Paint::Solid(hud_temperature_color(temp).into()));
    s.set_font(FONT_HUD);
    s.set_text_align(TextAlign::Left);
    s.fill_text(&format!("{temp}°C"), 70.0, 145.0);

    let (badge_bg, badge_text) = badge_colors(state.operational_state);
    s.set_fill(Paint::Solid(badge_bg.into()));
    s.rounded_rect_path(70.0, 160.0, 110.0, 28.0, 8.0);
    s.fill();

    s.set_fill(Paint::Solid(badge_text.into()));
    s.set_font(FONT_SMALL);
    s.set_text_align(TextAlign::Center);
    s.fill_text(state.operational_state.badge_label(), 125.0, 178.0);

    match state.operational_state {
        OperationalState::Charging | OperationalState::Cooling => {
            s.set_fill(solid(0x6B7280));
            s.set_font(FONT_LABEL);
            s.set_text_align(TextAlign::Left);
            let line = format!("Target: {}°C", state.target_temperature.round());
            s.fill_text(&line, 70.0, 205.0);
        }
        OperationalState::Discharging => {
            s.set_fill(solid(0xB91C1C));
            s.set_font(FONT_LABEL);
            s.set_text_align(TextAlign::Left);
            let line = format!("Output Air: {}°C", state.output_temperature.round());
            s.fill_text(&line, 70.0, 205.0);
        }
        OperationalState::Stopped => {}
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::render::display_list::{DisplayList, DrawCommand, RecordedPaint};
    use crate::systems::create_particle;

    struct Fixture {
        layout: Layout,
        speckle: SpeckleTexture,
        particles: Vec<Particle>,
    }

    impl Fixture {
        fn new() -> Self {
            let layout = Layout::default();
            let mut rng = SmallRng::seed_from_u64(7);
            let speckle = SpeckleTexture::generate(&layout, &mut rng);
            let particles = (0..10)
                .map(|_| create_particle(true, &layout, 25.0, &mut rng))
                .collect();
            Self { layout, speckle, particles }
        }

        fn draw(&self, state: &SimulationState, time_ms: f64) -> DisplayList {
            let view = FrameView {
                state,
                particles: &self.particles,
                layout: &self.layout,
                speckle: &self.speckle,
                room_temperature: 25.0,
                max_temperature: 600.0,
                fan_rotation: 0.0,
                time_ms,
            };
            let mut list = DisplayList::new();
            draw_scene(&mut list, &view, 1920.0, 1080.0);
            list
        }
    }

    fn discharging(current: f64, output: f64) -> SimulationState {
        SimulationState {
            operational_state: OperationalState::Discharging,
            current_temperature: current,
            target_temperature: 25.0,
            output_temperature: output,
            is_heating: false,
            is_fan_running: true,
        }
    }

    #[test]
    fn frame_starts_with_clear_and_ends_with_hud() {
        let fx = Fixture::new();
        let list = fx.draw(&SimulationState::at_rest(25.0), 0.0);

        assert_eq!(list.commands()[0], DrawCommand::ClearRect(0.0, 0.0, 1920.0, 1080.0));
        let texts = list.texts();
        assert_eq!(texts, vec!["25°C IN", "25°C OUT", "FAN OFF", "25°C", "STANDBY"]);
    }

    #[test]
    fn layers_are_painted_in_order() {
        let fx = Fixture::new();
        let list = fx.draw(&discharging(400.0, 150.0), 0.0);

        let inlet = list.position_of_text("25°C IN").unwrap();
        let outlet = list.position_of_text("150°C OUT").unwrap();
        let fan = list.position_of_text("FAN ON").unwrap();
        let hud = list.position_of_text("400°C").unwrap();
        assert!(inlet < outlet && outlet < fan && fan < hud);
        assert_eq!(list.texts().last().copied(), Some("Output Air: 150°C"));
    }

    #[test]
    fn particles_only_drawn_while_discharging() {
        let fx = Fixture::new();
        let alpha_changes =
            |list: &DisplayList| list.count(|c| matches!(c, DrawCommand::SetGlobalAlpha(_)));

        let idle = fx.draw(&SimulationState::at_rest(25.0), 0.0);
        assert_eq!(alpha_changes(&idle), 0);

        let running = fx.draw(&discharging(300.0, 40.0), 0.0);
        // one per particle plus the reset
        assert_eq!(alpha_changes(&running), fx.particles.len() + 1);
    }

    #[test]
    fn shimmer_needs_hot_output() {
        let fx = Fixture::new();
        let shimmer_strokes = |list: &DisplayList| {
            list.count(|c| {
                matches!(c, DrawCommand::SetStroke(RecordedPaint::Solid(p))
                    if p.rgb == Rgb::new(239, 68, 68) && p.a <= 0.4 && p.a > 0.0)
            })
        };

        assert_eq!(shimmer_strokes(&fx.draw(&discharging(300.0, 49.0), 0.0)), 0);
        assert_eq!(shimmer_strokes(&fx.draw(&discharging(300.0, 50.0), 0.0)), 4);
    }

    #[test]
    fn hud_shows_target_while_charging() {
        let fx = Fixture::new();
        let state = SimulationState {
            operational_state: OperationalState::Charging,
            current_temperature: 123.4,
            target_temperature: 600.0,
            output_temperature: 25.0,
            is_heating: true,
            is_fan_running: false,
        };
        let texts = fx.draw(&state, 0.0).texts().iter().map(|t| t.to_string()).collect::<Vec<_>>();
        assert!(texts.contains(&"123°C".to_string()));
        assert!(texts.contains(&"HEATING".to_string()));
        assert!(texts.contains(&"Target: 600°C".to_string()));
    }

    #[test]
    fn rod_glow_and_colors() {
        assert!(rod_glow_intensity(0.0, 600.0, false, 0.0).abs() < 1e-12);
        let residual = rod_glow_intensity(600.0, 600.0, false, 0.0);
        approx::assert_abs_diff_eq!(residual, 0.3, epsilon = 1e-9);
        let heating = rod_glow_intensity(300.0, 600.0, true, 0.0);
        approx::assert_abs_diff_eq!(heating, 0.8, epsilon = 1e-9);

        assert_eq!(rod_stops(500.0, true)[1].1, Rgba::from(Rgb::from_hex(0xEF4444)));
        assert_eq!(rod_stops(500.0, false)[1].1, Rgba::from(Rgb::from_hex(0xF59E0B)));
        assert_eq!(rod_stops(25.0, true)[1].1, Rgba::from(Rgb::from_hex(0xF59E0B)));
        assert_eq!(rod_stops(25.0, false)[1].1, Rgba::from(Rgb::from_hex(0x6B7280)));
    }

    #[test]
    fn hud_and_outlet_thresholds() {
        assert_eq!(hud_temperature_color(99.0), Rgb::from_hex(0x3B82F6));
        assert_eq!(hud_temperature_color(100.0), Rgb::from_hex(0xF59E0B));
        assert_eq!(hud_temperature_color(300.0), Rgb::from_hex(0xEF4444));

        assert_eq!(outlet_pipe_color(50.0), Rgb::from_hex(0x9CA3AF));
        assert_eq!(outlet_pipe_color(51.0), Rgb::from_hex(0xF97316));
        assert_eq!(outlet_pipe_color(101.0), Rgb::from_hex(0xEF4444));
    }

    #[test]
    fn speckle_is_fixed_once_generated() {
        let fx = Fixture::new();
        let a = fx.draw(&SimulationState::at_rest(25.0), 0.0);
        let b = fx.draw(&SimulationState::at_rest(25.0), 5000.0);
        // rods idle and no shimmer, so nothing depends on the clock
        assert_eq!(a.commands(), b.commands());
        // 304 x 404 core at 15 px spacing
        assert_eq!(fx.speckle.dots().len(), 21 * 27);
    }
}
