//! Platform-independent core of the folio portfolio.
//!
//! Nothing in this crate touches the browser; `folio-web` feeds it input and
//! draws what it produces.

pub mod audio;
pub mod camera;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod game;
pub mod loading;
pub mod mesh;
pub mod palette;
pub mod pick;
pub mod pointer;
pub mod projects;
pub mod scene;
pub mod scroll;
pub mod shutter;
pub mod theme;
pub mod uniforms;

pub use audio::{band_intensities, BandIntensities, BandRanges};
pub use camera::Camera;
pub use config::Tuning;
pub use error::AssetError;
pub use frame::{FrameInputs, FrameReport, FrameState, PageExit, RenderLoop};
pub use game::{GameEvent, GameState, MiniGame};
pub use palette::{Command, CommandPalette, NoticeTimer, Outcome};
pub use scene::{HeroModel, SceneGraph};
pub use scroll::{ScrollProgress, ScrollSample};
pub use theme::Theme;
pub use uniforms::SurfaceUniforms;
