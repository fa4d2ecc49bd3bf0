use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::context::{ContextError, SecurityContext};

#[derive(Debug, Clone)]
pub(crate) enum Step {
    Reply(Option<Vec<u8>>),
    ReplyAndComplete(Option<Vec<u8>>),
    Fail,
}

// Observations shared with the test after the context has been consumed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probe {
    pub disposed: Arc<AtomicUsize>,
    pub inputs: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Probe {
    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<Vec<u8>> {
        self.inputs.lock().unwrap().clone()
    }
}

/// Context that replays a fixed script, one step per evaluated token.
pub(crate) struct ScriptedContext {
    initial: Option<Vec<u8>>,
    steps: VecDeque<Step>,
    complete: bool,
    dispose_fails: bool,
    peer: Option<String>,
    probe: Probe,
}

impl ScriptedContext {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> (Self, Probe) {
        let probe = Probe::default();
        let ctx = Self {
            initial: None,
            steps: steps.into_iter().collect(),
            complete: false,
            dispose_fails: false,
            peer: None,
            probe: probe.clone(),
        };
        (ctx, probe)
    }

    pub fn with_initial(mut self, token: &[u8]) -> Self {
        self.initial = Some(token.to_vec());
        self
    }

    pub fn with_failing_dispose(mut self) -> Self {
        self.dispose_fails = true;
        self
    }

    pub fn with_peer(mut self, peer: &str) -> Self {
        self.peer = Some(peer.to_owned());
        self
    }

    pub fn boxed(self) -> Box<dyn SecurityContext> {
        Box::new(self)
    }
}

#[async_trait]
impl SecurityContext for ScriptedContext {
    fn mechanism(&self) -> &'static str {
        "SCRIPTED"
    }

    fn has_initial_output(&self) -> bool {
        self.initial.is_some()
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    async fn evaluate(&mut self, input: &[u8]) -> Result<Option<Vec<u8>>, ContextError> {
        if let Some(initial) = self.initial.take() {
            return Ok(Some(initial));
        }

        self.probe.inputs.lock().unwrap().push(input.to_vec());
        match self.steps.pop_front() {
            Some(Step::Reply(out)) => Ok(out),
            Some(Step::ReplyAndComplete(out)) => {
                self.complete = true;
                Ok(out)
            }
            Some(Step::Fail) => Err(ContextError::Evaluation("scripted failure".into())),
            None => Err(ContextError::Evaluation("script exhausted".into())),
        }
    }

    fn peer_identity(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    fn dispose(&mut self) -> Result<(), ContextError> {
        self.probe.disposed.fetch_add(1, Ordering::SeqCst);
        if self.dispose_fails {
            return Err(ContextError::Evaluation("dispose blew up".into()));
        }
        Ok(())
    }
}
