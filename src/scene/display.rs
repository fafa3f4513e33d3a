use crate::foundation::core::{Perspective, StageSize};

/// Surface the scene is laid out for. Read once during assembly.
pub trait DisplaySurface {
    fn size(&self) -> StageSize;
    fn perspective(&self) -> Perspective;
}

/// Fixed-size surface for headless evaluation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticDisplay {
    pub size: StageSize,
    pub perspective: Perspective,
}

impl StaticDisplay {
    pub fn new(size: StageSize, perspective: Perspective) -> Self {
        Self { size, perspective }
    }
}

impl Default for StaticDisplay {
    fn default() -> Self {
        Self {
            size: StageSize {
                width: 800.0,
                height: 600.0,
            },
            perspective: Perspective::default(),
        }
    }
}

impl DisplaySurface for StaticDisplay {
    fn size(&self) -> StageSize {
        self.size
    }

    fn perspective(&self) -> Perspective {
        self.perspective
    }
}
