//! Daily simulation time grid.
//!
//! The grid is fixed at [`STEPS_PER_YEAR`] steps per year; a tenor `T` gives
//! `floor(T × 252)` steps and `floor(T × 252) + 1` grid points including t = 0.

/// Number of simulation steps per year (business days).
pub const STEPS_PER_YEAR: usize = 252;

/// Uniform time grid `t_s = s × dt`, `s = 0..=num_steps`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    num_steps: usize,
    dt: f64,
}

impl TimeGrid {
    /// Builds the daily grid covering `tenor` years.
    ///
    /// Non-positive or non-finite tenors give an empty grid (t = 0 only);
    /// callers validate the tenor before simulating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::mc::TimeGrid;
    ///
    /// let grid = TimeGrid::from_tenor(5.0);
    /// assert_eq!(grid.num_steps(), 1260);
    /// assert_eq!(grid.len(), 1261);
    /// ```
    pub fn from_tenor(tenor: f64) -> Self {
        let num_steps = if tenor.is_finite() && tenor > 0.0 {
            (tenor * STEPS_PER_YEAR as f64).floor() as usize
        } else {
            0
        };
        Self::with_steps(num_steps)
    }

    /// Builds a daily grid with an explicit step count.
    pub fn with_steps(num_steps: usize) -> Self {
        Self {
            num_steps,
            dt: 1.0 / STEPS_PER_YEAR as f64,
        }
    }

    /// Number of steps after t = 0.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Number of grid points, `num_steps + 1`.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.num_steps + 1
    }

    /// Step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time in years of grid point `step`.
    #[inline]
    pub fn time(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    /// All grid times.
    pub fn times(&self) -> Vec<f64> {
        (0..=self.num_steps).map(|s| self.time(s)).collect()
    }

    /// Simulated horizon in years, `num_steps × dt`.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.time(self.num_steps)
    }

    /// Last step index inside a horizon of `years`: `floor(years × 252)`,
    /// clamped to the grid. Non-positive horizons map to step 0.
    pub fn horizon_step(&self, years: f64) -> usize {
        if years.is_nan() || years <= 0.0 {
            return 0;
        }
        let steps = (years * STEPS_PER_YEAR as f64).floor();
        if steps >= self.num_steps as f64 {
            self.num_steps
        } else {
            steps as usize
        }
    }

    /// Grid point nearest to `years`: `round(years × 252)`, clamped to the grid.
    pub fn nearest_step(&self, years: f64) -> usize {
        if years.is_nan() || years <= 0.0 {
            return 0;
        }
        let steps = (years * STEPS_PER_YEAR as f64).round();
        if steps >= self.num_steps as f64 {
            self.num_steps
        } else {
            steps as usize
        }
    }
}
