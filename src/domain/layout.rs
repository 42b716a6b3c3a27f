//! Fixed spatial layout of the exhibit (1920x1080 design space)

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout field `{0}` must be finite and positive")]
    NotPositive(&'static str),

    #[error("shell and insulation leave no room for the sand core")]
    DegenerateCore,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub center_x: f64,
    pub center_y: f64,
    pub battery_width: f64,
    pub battery_height: f64,
    pub shell_thickness: f64,
    pub insulation_thickness: f64,
    pub sand_core_width: f64,
    pub sand_core_height: f64,
    pub inlet_pipe_y: f64,
    pub outlet_pipe_y: f64,
    pub pipe_length: f64,
    pub fan_radius: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            center_x: 960.0,
            center_y: 540.0,
            battery_width: 400.0,
            battery_height: 500.0,
            shell_thickness: 8.0,
            insulation_thickness: 40.0,
            sand_core_width: 304.0,
            sand_core_height: 404.0,
            inlet_pipe_y: 540.0,
            outlet_pipe_y: 540.0,
            pipe_length: 150.0,
            fan_radius: 40.0,
        }
    }
}

/// Axis-aligned rectangle in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Layout {
    /// Default layout, checked
    pub fn standard() -> Result<Self, LayoutError> {
        let layout = Self::default();
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("center_x", self.center_x),
            ("center_y", self.center_y),
            ("battery_width", self.battery_width),
            ("battery_height", self.battery_height),
            ("shell_thickness", self.shell_thickness),
            ("insulation_thickness", self.insulation_thickness),
            ("sand_core_width", self.sand_core_width),
            ("sand_core_height", self.sand_core_height),
            ("inlet_pipe_y", self.inlet_pipe_y),
            ("outlet_pipe_y", self.outlet_pipe_y),
            ("pipe_length", self.pipe_length),
            ("fan_radius", self.fan_radius),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::NotPositive(name));
            }
        }

        let core = self.core_rect();
        if core.w <= 0.0 || core.h <= 0.0 || self.particle_path_scale() <= 0.0 {
            return Err(LayoutError::DegenerateCore);
        }
        Ok(())
    }

    pub fn shell_rect(&self) -> Rect {
        Rect {
            x: self.center_x - self.battery_width / 2.0,
            y: self.center_y - self.battery_height / 2.0,
            w: self.battery_width,
            h: self.battery_height,
        }
    }

    pub fn insulation_rect(&self) -> Rect {
        let s = self.shell_rect();
        Rect {
            x: s.x + self.shell_thickness,
            y: s.y + self.shell_thickness,
            w: s.w - self.shell_thickness * 2.0,
            h: s.h - self.shell_thickness * 2.0,
        }
    }

    /// Sand core interior (inside shell and insulation)
    pub fn core_rect(&self) -> Rect {
        let wall = self.shell_thickness + self.insulation_thickness;
        let s = self.shell_rect();
        Rect {
            x: s.x + wall,
            y: s.y + wall,
            w: s.w - wall * 2.0,
            h: s.h - wall * 2.0,
        }
    }

    #[inline]
    pub fn core_start_x(&self) -> f64 {
        self.core_rect().x
    }

    #[inline]
    pub fn core_end_x(&self) -> f64 {
        let c = self.core_rect();
        c.x + c.w
    }

    /// Pixel span of one unit of pipe progress
    #[inline]
    pub fn core_width(&self) -> f64 {
        self.core_rect().w
    }

    /// Divisor turning pixel lengths into particle progress units.
    /// Narrower than the drawn core, so airflow reads slightly faster than the pipe.
    #[inline]
    pub fn particle_path_scale(&self) -> f64 {
        self.sand_core_width - self.insulation_thickness * 2.0
    }

    pub fn fan_center(&self) -> (f64, f64) {
        let shell_left = self.center_x - self.battery_width / 2.0;
        let x = shell_left - self.pipe_length - self.fan_radius - 20.0;
        (x, self.inlet_pipe_y)
    }

    pub fn inlet_start_x(&self) -> f64 {
        self.center_x - self.battery_width / 2.0 - self.pipe_length
    }

    pub fn outlet_start_x(&self) -> f64 {
        self.center_x + self.battery_width / 2.0
    }
}
