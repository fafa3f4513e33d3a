use crate::{
    actor::model::BoxSize,
    foundation::core::{Perspective, Point, StageSize, Vec2},
    foundation::error::{BoxflyError, BoxflyResult},
};

/// Inputs of [`compute_layout`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutParams {
    pub stage: StageSize,
    pub perspective: Perspective,
    pub rows: u32,
    pub cols: u32,
    /// Box width/height as a fraction of the stage.
    pub box_scale: f64,
    /// Box depth as a fraction of the box width.
    pub depth_ratio: f64,
    /// Depth travel as a multiple of the stage width.
    pub stage_depth_factor: f64,
    /// Extra scale on the far-plane spawn extent.
    pub far_scale: f64,
    /// Spacing between grid cells in far-plane extents.
    pub grid_gap: f64,
}

impl LayoutParams {
    pub fn new(stage: StageSize, perspective: Perspective, rows: u32, cols: u32) -> Self {
        Self {
            stage,
            perspective,
            rows,
            cols,
            box_scale: 1.0,
            depth_ratio: 0.25,
            stage_depth_factor: 4.0,
            far_scale: 1.0,
            grid_gap: 1.0,
        }
    }

    pub fn validate(&self) -> BoxflyResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BoxflyError::configuration(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.perspective.validate()?;
        StageSize::new(self.stage.width, self.stage.height)?;

        let positive = [("box_scale", self.box_scale), ("far_scale", self.far_scale)];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(BoxflyError::configuration(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        let non_negative = [
            ("depth_ratio", self.depth_ratio),
            ("stage_depth_factor", self.stage_depth_factor),
            ("grid_gap", self.grid_gap),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(BoxflyError::configuration(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// One grid slot and the point its box flies in from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub start: Point,
}

/// Placement of every box, computed once before assembly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneLayout {
    /// Stage centre; the last waypoint of every path.
    pub destination: Point,
    /// Stage extent projected onto the far plane.
    pub far_extent: Vec2,
    pub box_size: BoxSize,
    /// Depth the boxes start at, below the stage plane.
    pub stage_depth: f64,
    /// Cells in row-major order.
    pub cells: Vec<GridCell>,
    rows: u32,
    cols: u32,
    grid_gap: f64,
}

impl SceneLayout {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Start point of the box at `(row, col)`. The grid is centred on the destination, so
    /// opposite cells mirror each other through it.
    pub fn start_for(&self, row: u32, col: u32) -> Point {
        let dc = col as f64 - (self.cols as f64 - 1.0) / 2.0;
        let dr = row as f64 - (self.rows as f64 - 1.0) / 2.0;
        self.destination
            + Vec2::new(
                dc * self.far_extent.x * self.grid_gap,
                dr * self.far_extent.y * self.grid_gap,
            )
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&GridCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get((row * self.cols + col) as usize)
    }
}

/// Derive box size, depth travel and per-cell start points from the display.
#[tracing::instrument(skip(params), fields(rows = params.rows, cols = params.cols))]
pub fn compute_layout(params: &LayoutParams) -> BoxflyResult<SceneLayout> {
    params.validate()?;

    let StageSize { width, height } = params.stage;
    let far = params.perspective.far_ratio() * params.far_scale;
    let box_width = width * params.box_scale;

    let mut layout = SceneLayout {
        destination: params.stage.center(),
        far_extent: Vec2::new(width * far, height * far),
        box_size: BoxSize {
            width: box_width,
            height: height * params.box_scale,
            depth: box_width * params.depth_ratio,
        },
        stage_depth: width * params.stage_depth_factor,
        cells: Vec::with_capacity((params.rows * params.cols) as usize),
        rows: params.rows,
        cols: params.cols,
        grid_gap: params.grid_gap,
    };

    for row in 0..params.rows {
        for col in 0..params.cols {
            let start = layout.start_for(row, col);
            layout.cells.push(GridCell { row, col, start });
        }
    }

    tracing::debug!(
        far_width = layout.far_extent.x,
        far_height = layout.far_extent.y,
        stage_depth = layout.stage_depth,
        "layout computed"
    );
    Ok(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
