pub mod audio;
pub mod clock;
pub mod gate;
pub mod marker;
pub mod rasterizer;
pub mod sampler;
pub mod scene;
pub mod surface;
pub mod timer;

pub use audio::{AudioSink, ClipPlayer};
pub use clock::Clock;
pub use gate::{DrawingGate, DrawingWindow, GateSwitch};
pub use marker::{Marker, MarkerConfig, MarkerState, StrokePhase, TickReport, TipPose};
pub use rasterizer::{rasterize, Stroke};
pub use sampler::{uv_to_pixel, ContactResult, ContactSampler};
pub use scene::{CollisionEvent, Quad, RaycastHit, Scene, SceneObject, SceneQuery, SurfaceId, Tag};
pub use surface::{BlockRect, PixelSurface};
pub use timer::{Countdown, Interval, TimerQueue};
