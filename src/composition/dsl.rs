use crate::{
    composition::model::{
        AnimationSpec, Composition, ImageSource, SceneDescriptor, VideoSource, VisualContent,
    },
    diagram::DiagramConfig,
    effects::post::EffectsSpec,
    effects::transitions::{TransitionSpec, TransitionsSpec},
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    layers::{shape::Shape, text::TextOverlay},
    visual::camera::CameraSpec,
};

/// Programmatic alternative to a JSON timeline descriptor.
pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    duration_frames: u64,
    scenes: Vec<SceneDescriptor>,
    background_audio: Option<String>,
    background_volume: f64,
}

impl CompositionBuilder {
    /// Empty composition on the default canvas.
    pub fn new(fps: Fps, duration_frames: u64) -> Self {
        Self {
            fps,
            canvas: Canvas::default(),
            duration_frames,
            scenes: Vec::new(),
            background_audio: None,
            background_volume: 0.25,
        }
    }

    /// Output canvas.
    pub fn canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Background music and its base gain.
    pub fn background_audio(mut self, src: impl Into<String>, volume: f64) -> Self {
        self.background_audio = Some(src.into());
        self.background_volume = volume;
        self
    }

    /// Append a scene; ids must be unique.
    pub fn scene(mut self, scene: SceneDescriptor) -> ReelResult<Self> {
        if self.scenes.iter().any(|s| s.id == scene.id) {
            return Err(ReelError::validation(format!(
                "duplicate scene id '{}'",
                scene.id
            )));
        }
        self.scenes.push(scene);
        Ok(self)
    }

    /// Append a scene placed right after the last one.
    pub fn then_scene(self, scene: SceneBuilder) -> ReelResult<Self> {
        let start = self
            .scenes
            .iter()
            .map(|s| s.range().end.0)
            .max()
            .unwrap_or(0);
        self.scene(scene.start_frame(start).build())
    }

    /// Validate and return the composition.
    pub fn build(self) -> ReelResult<Composition> {
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            duration_frames: self.duration_frames,
            scenes: self.scenes,
            background_audio: self.background_audio,
            background_volume: self.background_volume,
        };
        comp.validate()?;
        Ok(comp)
    }
}

/// Video source with default playback.
pub fn video(src: impl Into<String>) -> VideoSource {
    VideoSource {
        src: src.into(),
        ..VideoSource::default()
    }
}

/// Builder for one [`SceneDescriptor`].
pub struct SceneBuilder {
    scene: SceneDescriptor,
}

impl SceneBuilder {
    /// Scene with no visual at frame 0.
    pub fn new(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            scene: SceneDescriptor {
                id: id.into(),
                start_frame: 0,
                duration_frames,
                visual: VisualContent::None,
                audio: None,
                audio_volume: 1.0,
                animation: AnimationSpec::default(),
            },
        }
    }

    /// First global frame.
    pub fn start_frame(mut self, start_frame: u64) -> Self {
        self.scene.start_frame = start_frame;
        self
    }

    /// Still image visual.
    pub fn image(mut self, src: impl Into<String>) -> Self {
        self.scene.visual = VisualContent::Image(ImageSource { src: src.into() });
        self
    }

    /// Video visual.
    pub fn video(mut self, video: VideoSource) -> Self {
        self.scene.visual = VisualContent::Video(video);
        self
    }

    /// Diagram visual.
    pub fn diagram(mut self, diagram: DiagramConfig) -> Self {
        self.scene.visual = VisualContent::Diagram { diagram };
        self
    }

    /// Narration track and gain.
    pub fn narration(mut self, src: impl Into<String>, volume: f64) -> Self {
        self.scene.audio = Some(src.into());
        self.scene.audio_volume = volume;
        self
    }

    /// Ken Burns camera.
    pub fn camera(mut self, camera: CameraSpec) -> Self {
        self.scene.animation.camera = Some(camera);
        self
    }

    /// Append a text overlay.
    pub fn text(mut self, overlay: TextOverlay) -> Self {
        self.scene.animation.text_overlays.push(overlay);
        self
    }

    /// Append a shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.scene.animation.shapes.push(shape);
        self
    }

    /// Post effects.
    pub fn effects(mut self, effects: EffectsSpec) -> Self {
        self.scene.animation.effects = effects;
        self
    }

    /// Entry transition.
    pub fn enter(mut self, t: TransitionSpec) -> Self {
        self.scene.animation.transitions.enter = Some(t);
        self
    }

    /// Exit transition.
    pub fn exit(mut self, t: TransitionSpec) -> Self {
        self.scene.animation.transitions.exit = Some(t);
        self
    }

    /// Both transitions at once.
    pub fn transitions(mut self, transitions: TransitionsSpec) -> Self {
        self.scene.animation.transitions = transitions;
        self
    }

    /// Finished descriptor.
    pub fn build(self) -> SceneDescriptor {
        self.scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
