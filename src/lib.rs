//! Reelcraft is a deterministic, frame-indexed scene composition and animation engine.
//!
//! A [`Composition`] (usually parsed from a JSON timeline descriptor) places scenes on a
//! global frame axis. Every frame is a pure function of the composition and the frame
//! number:
//!
//! - [`Evaluator::eval_frame`] returns a [`FrameState`]: the back-to-front layer stack
//!   (visual, shapes, text overlays, post effects) plus per-track audio gains.
//! - [`eval_frames`] evaluates a range serially or on a rayon pool with identical output.
//! - [`AssetStore::prepare`] resolves image, video and audio references ahead of time;
//!   anything missing degrades to a blank or silent layer and a [`Diagnostic`].
//!
//! Rasterizing layers and encoding containers are left to downstream stages.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod audio;
mod composition;
mod diagram;
mod effects;
mod eval;
mod foundation;
mod layers;
mod schedule;
mod visual;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Transform2D, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, interpolate, interpolate_clamped,
};
pub use crate::animation::spring::{
    SpringConfig, measure_spring, spring, spring_between, spring_delayed,
};

pub use crate::assets::source::{AssetKey, AssetRef, normalize_rel_path};
pub use crate::assets::store::{
    AssetKind, AssetLoader, AssetLoaderOpts, AssetStatus, AssetStore, LoadedAsset, Resolved,
    resolve,
};

pub use crate::audio::envelope::{
    AudioFrame, AudioTrackState, BACKGROUND_FADE_SECS, TrackRole, background_gain, mix_frame,
};

pub use crate::composition::dsl::{CompositionBuilder, SceneBuilder, video};
pub use crate::composition::model::{
    AnimationSpec, Composition, ImageSource, SceneDescriptor, VideoSource, VisualContent,
};

pub use crate::diagram::chemical::{ChemicalReaction, Species, formula_color};
pub use crate::diagram::comparison::{Column, Comparison};
pub use crate::diagram::process_flow::{FlowDirection, FlowStep, ProcessFlow};
pub use crate::diagram::timeline::{TimelineDiagram, TimelineEvent};
pub use crate::diagram::{DiagramConfig, DiagramLayer, DiagramRenderer, Primitive, ReactionSide};

pub use crate::effects::post::{
    ColorFilter, ColorGradeSpec, EffectsLayer, EffectsSpec, GradePreset, GrainSpec, GrainState,
    LetterboxSpec, VignetteSpec, grain_seed,
};
pub use crate::effects::transitions::{
    DEFAULT_TRANSITION_FRAMES, Reveal, TransitionEdge, TransitionKind, TransitionSpec,
    TransitionState, TransitionsSpec, WipeDir, edge_progress, narrower_reveal, scene_transition,
    transition_state,
};

pub use crate::eval::batch::{BatchOpts, eval_frames};
pub use crate::eval::diagnostic::{Diagnostic, DiagnosticKind};
pub use crate::eval::evaluator::{Evaluator, FrameState, SceneFrame};

pub use crate::layers::shape::{
    PercentRect, Shape, ShapeAnimation, ShapeGeometry, ShapeKind, ShapeLayer, ShapeSource,
};
pub use crate::layers::text::{
    Anchor, TextAlign, TextAnimation, TextLayer, TextMotion, TextOverlay, TextOverlayLayer,
    TextStyle,
};
pub use crate::layers::window::{EDGE_FRAMES, Window};
pub use crate::layers::{FrameCtx, LayerContent, LayerSource, LayerState};

pub use crate::schedule::scheduler::{ActiveScene, active_scene, overlapping_pairs, scenes_at};

pub use crate::visual::camera::{CameraSpec, CameraState};
pub use crate::visual::content::{
    ImageLayer, VideoLayer, VisualRenderer, video_gain, video_source_time,
};
