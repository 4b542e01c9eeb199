/// `Constructed -> Attached -> Started -> Running`; `Running` is re-entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Constructed,
    Attached,
    Started,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("widget '{param}' is already attached")]
    AlreadyAttached { param: String },
    #[error("widget '{param}' must be attached before it can start")]
    NotAttached { param: String },
    #[error("widget '{param}' is already started")]
    AlreadyStarted { param: String },
    #[error("widget '{param}' must be started before it can run")]
    NotStarted { param: String },
}

impl Phase {
    pub(crate) fn advance(&mut self, param: &str, to: Phase) -> Result<(), LifecycleError> {
        let param = param.to_string();
        let allowed = match (to, *self) {
            (Phase::Attached, Phase::Constructed) => Ok(()),
            (Phase::Attached, _) => Err(LifecycleError::AlreadyAttached { param }),
            (Phase::Started, Phase::Attached) => Ok(()),
            (Phase::Started, Phase::Constructed) => Err(LifecycleError::NotAttached { param }),
            (Phase::Started, _) => Err(LifecycleError::AlreadyStarted { param }),
            (Phase::Running, Phase::Started | Phase::Running) => Ok(()),
            (Phase::Running, _) => Err(LifecycleError::NotStarted { param }),
            (Phase::Constructed, _) => Ok(()),
        };
        allowed.map(|()| *self = to)
    }
}
