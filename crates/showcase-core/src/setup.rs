//! Setup-phase state machine for the viewer pipeline.
//!
//! The engine requires plugins to be registered in a fixed order, the pipeline
//! to be finalized exactly once after the last registration, and the asset to
//! load only after that. [`SetupSequence`] turns violations into errors.

use crate::constants::{PROGRESSIVE_SAMPLES, TONEMAP_CONTRAST};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPlugin {
    AssetManager,
    GBuffer,
    Progressive { samples: u32 },
    Tonemap { contrast: bool },
    GammaCorrection,
    Ssr,
    Ssao,
    Bloom,
}

impl RenderPlugin {
    pub fn name(&self) -> &'static str {
        match self {
            RenderPlugin::AssetManager => "AssetManagerPlugin",
            RenderPlugin::GBuffer => "GBufferPlugin",
            RenderPlugin::Progressive { .. } => "ProgressivePlugin",
            RenderPlugin::Tonemap { .. } => "TonemapPlugin",
            RenderPlugin::GammaCorrection => "GammaCorrectionPlugin",
            RenderPlugin::Ssr => "SSRPlugin",
            RenderPlugin::Ssao => "SSAOPlugin",
            RenderPlugin::Bloom => "BloomPlugin",
        }
    }
}

impl fmt::Display for RenderPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registration order expected by the engine's render pipeline.
pub const PIPELINE: [RenderPlugin; 8] = [
    RenderPlugin::AssetManager,
    RenderPlugin::GBuffer,
    RenderPlugin::Progressive {
        samples: PROGRESSIVE_SAMPLES,
    },
    RenderPlugin::Tonemap {
        contrast: TONEMAP_CONTRAST,
    },
    RenderPlugin::GammaCorrection,
    RenderPlugin::Ssr,
    RenderPlugin::Ssao,
    RenderPlugin::Bloom,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupPhase {
    #[default]
    Init,
    PluginsRegistered,
    PipelineFinalized,
    AssetLoaded,
    Ready,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("plugin {found} registered out of order (expected {expected})")]
    OutOfOrder {
        expected: RenderPlugin,
        found: RenderPlugin,
    },
    #[error("plugin {0} registered after the pipeline was complete")]
    PipelineFull(RenderPlugin),
    #[error("{op} is not allowed in phase {phase:?}")]
    WrongPhase { op: &'static str, phase: SetupPhase },
}

#[derive(Clone, Debug, Default)]
pub struct SetupSequence {
    phase: SetupPhase,
    registered: SmallVec<[RenderPlugin; 8]>,
}

impl SetupSequence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> SetupPhase {
        self.phase
    }

    pub fn registered(&self) -> &[RenderPlugin] {
        &self.registered
    }

    /// Next plugin the pipeline expects, if any remain.
    fn next_plugin(&self) -> Option<RenderPlugin> {
        PIPELINE.get(self.registered.len()).copied()
    }

    pub fn register(&mut self, plugin: RenderPlugin) -> Result<(), SetupError> {
        if self.phase != SetupPhase::Init {
            return Err(SetupError::PipelineFull(plugin));
        }
        let expected = self.next_plugin().ok_or(SetupError::PipelineFull(plugin))?;
        if expected != plugin {
            return Err(SetupError::OutOfOrder {
                expected,
                found: plugin,
            });
        }
        self.registered.push(plugin);
        if self.registered.len() == PIPELINE.len() {
            self.phase = SetupPhase::PluginsRegistered;
        }
        Ok(())
    }

    pub fn finalize_pipeline(&mut self) -> Result<(), SetupError> {
        self.advance(
            "finalize_pipeline",
            SetupPhase::PluginsRegistered,
            SetupPhase::PipelineFinalized,
        )
    }

    pub fn asset_loaded(&mut self) -> Result<(), SetupError> {
        self.advance(
            "asset_loaded",
            SetupPhase::PipelineFinalized,
            SetupPhase::AssetLoaded,
        )
    }

    pub fn ready(&mut self) -> Result<(), SetupError> {
        self.advance("ready", SetupPhase::AssetLoaded, SetupPhase::Ready)
    }

    fn advance(
        &mut self,
        op: &'static str,
        from: SetupPhase,
        to: SetupPhase,
    ) -> Result<(), SetupError> {
        if self.phase != from {
            return Err(SetupError::WrongPhase {
                op,
                phase: self.phase,
            });
        }
        log::debug!("[setup] {:?} -> {:?}", from, to);
        self.phase = to;
        Ok(())
    }
}
