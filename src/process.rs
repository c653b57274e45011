//! Process abstraction.
//! `ChainedProcess` is monomorphised: the compiler knows the concrete type of
//! every stage and inlines the whole chain. `DynamicProcess` is the runtime
//! fallback for pipelines assembled from configuration.
use crate::{context::Context, stage::Stage};
use smallvec::SmallVec;
use std::{borrow::Cow, sync::Arc};
use tracing::trace;

pub trait Process: Send + Sync {
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str>;
}

pub struct EmptyProcess;

impl Process for EmptyProcess {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        text
    }
}

pub struct ChainedProcess<S: Stage, P: Process> {
    pub stage: S,
    pub previous: P,
}

impl<S: Stage, P: Process> Process for ChainedProcess<S, P> {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        let current = self.previous.process(text, ctx);
        run_stage(&self.stage, current, ctx)
    }
}

#[derive(Default)]
pub struct DynamicProcess {
    pub(crate) stages: SmallVec<[Arc<dyn Stage>; 8]>,
}

impl DynamicProcess {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }
}

impl Process for DynamicProcess {
    fn process<'a>(&self, mut text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        for stage in &self.stages {
            text = run_stage(stage.as_ref(), text, ctx);
        }
        text
    }
}

#[inline(always)]
fn run_stage<'a, S: Stage + ?Sized>(stage: &S, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
    // Fast path: skip if no mutation needed
    if !stage.needs_apply(&text, ctx) {
        trace!(stage = stage.name(), "skipped");
        return text;
    }
    let out = stage.apply(text, ctx);
    trace!(stage = stage.name(), len = out.len(), "applied");
    out
}
