//! Construction phases and their ordering check

use tracing::debug;

/// Stage construction phases in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StagePhase {
    CreatePlayer,
    CreateWalls,
    CreateMovables,
    CreateItems,
    CreateBots,
    ImportMeshes,
    CreateSkybox,
    CreateSprites,
    CreateLights,
    CreateShadowGenerators,
    AssignShadows,
    CreateCameraSystem,
    CreateHud,
    InitComplete,
}

impl StagePhase {
    pub const ALL: [StagePhase; 14] = [
        StagePhase::CreatePlayer,
        StagePhase::CreateWalls,
        StagePhase::CreateMovables,
        StagePhase::CreateItems,
        StagePhase::CreateBots,
        StagePhase::ImportMeshes,
        StagePhase::CreateSkybox,
        StagePhase::CreateSprites,
        StagePhase::CreateLights,
        StagePhase::CreateShadowGenerators,
        StagePhase::AssignShadows,
        StagePhase::CreateCameraSystem,
        StagePhase::CreateHud,
        StagePhase::InitComplete,
    ];

    /// The phase that follows this one
    pub fn next(self) -> Option<StagePhase> {
        Self::ALL.get(self as usize + 1).copied()
    }

    /// Phases that may only run once the import barrier has fired
    pub fn is_post_import(self) -> bool {
        self > StagePhase::ImportMeshes
    }
}

/// Tracks the current phase and panics on any out-of-order entry
///
/// An ordering violation means the host scheduled work wrongly and the stage
/// is only partly built, so it is never recovered from.
#[derive(Debug, Clone, Default)]
pub struct PhaseCursor {
    current: Option<StagePhase>,
    imports_settled: bool,
}

impl PhaseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the next phase
    ///
    /// # Panics
    /// If `phase` is not the successor of the current phase, or is a
    /// post-import phase entered before the import barrier fired.
    pub fn enter(&mut self, phase: StagePhase) {
        let expected = match self.current {
            None => Some(StagePhase::CreatePlayer),
            Some(current) => current.next(),
        };
        assert!(
            expected == Some(phase),
            "stage phase order violated: entered {phase:?} after {:?}",
            self.current
        );
        assert!(
            !phase.is_post_import() || self.imports_settled,
            "stage phase order violated: {phase:?} entered before the import barrier fired"
        );

        debug!(phase = ?phase, "Entering stage phase");
        self.current = Some(phase);
    }

    /// Record that the import barrier fired
    ///
    /// # Panics
    /// If the import phase is not the current phase.
    pub fn mark_imports_settled(&mut self) {
        assert!(
            self.current == Some(StagePhase::ImportMeshes),
            "import barrier fired during {:?}",
            self.current
        );
        self.imports_settled = true;
    }

    pub fn current(&self) -> Option<StagePhase> {
        self.current
    }

    pub fn imports_settled(&self) -> bool {
        self.imports_settled
    }

    pub fn is_complete(&self) -> bool {
        self.current == Some(StagePhase::InitComplete)
    }
}
