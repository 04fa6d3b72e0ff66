/// Visual theme selectable from the command palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Cyberpunk,
    Matrix,
    Minimalist,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Cyberpunk => "cyberpunk",
            Theme::Matrix => "matrix",
            Theme::Minimalist => "minimalist",
        }
    }

    /// Class put on `<body>`; the stylesheet keys colours off it.
    pub fn body_class(self) -> String {
        format!("theme-{}", self.name())
    }

    /// Particle field colour (linear RGB).
    pub fn particle_color(self) -> [f32; 3] {
        match self {
            Theme::Cyberpunk => [1.0, 0.2, 0.4],
            Theme::Matrix => [0.0, 1.0, 0.255],
            Theme::Minimalist => [0.85, 0.85, 0.85],
        }
    }

    /// Hero emissive tint.
    pub fn accent_color(self) -> [f32; 3] {
        match self {
            Theme::Cyberpunk => [0.0, 0.83, 1.0],
            Theme::Matrix => [0.0, 0.6, 0.15],
            Theme::Minimalist => [1.0, 1.0, 1.0],
        }
    }
}
