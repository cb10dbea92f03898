//! Player action records decoded from the commands section

use std::fmt;

use serde::Serialize;

use crate::time::format_frames;

/// Command opcodes (first byte of each command)
pub mod opcodes {
    pub const SELECT: u8 = 0x09;
    pub const SHIFT_SELECT: u8 = 0x0A;
    pub const SHIFT_DESELECT: u8 = 0x0B;
    pub const BUILD: u8 = 0x0C;
    pub const VISION: u8 = 0x0D;
    pub const ALLY: u8 = 0x0E;
    pub const GAME_SPEED: u8 = 0x0F;
    pub const USE_CHEAT: u8 = 0x12;
    pub const HOTKEY: u8 = 0x13;
    pub const MOVE: u8 = 0x14;
    pub const TARGETED_ORDER: u8 = 0x15;
    pub const CANCEL: u8 = 0x18;
    pub const CANCEL_HATCH: u8 = 0x19;
    pub const STOP: u8 = 0x1A;
    pub const RETURN_CARGO: u8 = 0x1E;
    pub const TRAIN: u8 = 0x1F;
    pub const CANCEL_TRAIN: u8 = 0x20;
    pub const CLOAK: u8 = 0x21;
    pub const DECLOAK: u8 = 0x22;
    pub const HATCH: u8 = 0x23;
    pub const UNSIEGE: u8 = 0x25;
    pub const SIEGE: u8 = 0x26;
    pub const BUILD_INTERCEPTOR: u8 = 0x27;
    pub const UNLOAD_ALL: u8 = 0x28;
    pub const UNLOAD: u8 = 0x29;
    pub const MERGE_ARCHON: u8 = 0x2A;
    pub const HOLD_POSITION: u8 = 0x2B;
    pub const BURROW: u8 = 0x2C;
    pub const UNBURROW: u8 = 0x2D;
    pub const CANCEL_NUKE: u8 = 0x2E;
    pub const LIFT: u8 = 0x2F;
    pub const RESEARCH: u8 = 0x30;
    pub const CANCEL_RESEARCH: u8 = 0x31;
    pub const UPGRADE: u8 = 0x32;
    pub const MORPH: u8 = 0x35;
    pub const STIM: u8 = 0x36;
    pub const LEAVE_GAME: u8 = 0x57;
    pub const MINIMAP_PING: u8 = 0x58;
    pub const MERGE_DARK_ARCHON: u8 = 0x5A;
    pub const CHAT: u8 = 0x5C;
}

/// Canonical action kind
///
/// Most kinds map one-to-one to an opcode. Targeted orders (0x15) are
/// resolved through their order subtype, and plain moves (0x14) share the
/// `Move` kind with right-click moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    Select,
    ShiftSelect,
    ShiftDeselect,
    Build,
    Vision,
    Ally,
    ChangeGameSpeed,
    Hotkey,
    Move,
    Gather,
    AttackMove,
    SetRally,
    Train,
    CancelTrain,
    Hatch,
    Morph,
    Research,
    Upgrade,
    Stop,
    ReturnCargo,
    Cloak,
    Decloak,
    Unsiege,
    Siege,
    UnloadAll,
    HoldPosition,
    Burrow,
    Unburrow,
    LeaveGame,
    Unload,
    MinimapPing,
    UseCheat,
    Lift,
    Cancel,
    CancelHatch,
    BuildInterceptor,
    MergeArchon,
    CancelNuke,
    CancelResearch,
    Stim,
    MergeDarkArchon,
    /// Targeted order with a subtype that has no dedicated kind
    Unknown,
}

impl ActionKind {
    /// Kind for a targeted order (0x15) subtype
    pub fn from_order_subtype(subtype: u8) -> Self {
        match subtype {
            0x00 | 0x06 => ActionKind::Move,
            0x09 | 0x4F | 0x50 => ActionKind::Gather,
            0x0E => ActionKind::AttackMove,
            0x28 => ActionKind::SetRally,
            _ => ActionKind::Unknown,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Select => "Select",
            ActionKind::ShiftSelect => "Shift Select",
            ActionKind::ShiftDeselect => "Shift Deselect",
            ActionKind::Build => "Build",
            ActionKind::Vision => "Vision",
            ActionKind::Ally => "Ally",
            ActionKind::ChangeGameSpeed => "Change Game Speed",
            ActionKind::Hotkey => "Hotkey",
            ActionKind::Move => "Move",
            ActionKind::Gather => "Gather",
            ActionKind::AttackMove => "Attack Move",
            ActionKind::SetRally => "Set Rally",
            ActionKind::Train => "Train",
            ActionKind::CancelTrain => "Cancel Train",
            ActionKind::Hatch => "Hatch",
            ActionKind::Morph => "Morph",
            ActionKind::Research => "Research",
            ActionKind::Upgrade => "Upgrade",
            ActionKind::Stop => "Stop",
            ActionKind::ReturnCargo => "Return Cargo",
            ActionKind::Cloak => "Cloak",
            ActionKind::Decloak => "Decloak",
            ActionKind::Unsiege => "Unsiege",
            ActionKind::Siege => "Siege",
            ActionKind::UnloadAll => "Unload All",
            ActionKind::HoldPosition => "Hold Position",
            ActionKind::Burrow => "Burrow",
            ActionKind::Unburrow => "Unburrow",
            ActionKind::LeaveGame => "Leave Game",
            ActionKind::Unload => "Unload",
            ActionKind::MinimapPing => "Minimap Ping",
            ActionKind::UseCheat => "Use Cheat",
            ActionKind::Lift => "Lift",
            ActionKind::Cancel => "Cancel",
            ActionKind::CancelHatch => "Cancel Hatch",
            ActionKind::BuildInterceptor => "Build Interceptor/Scarab",
            ActionKind::MergeArchon => "Merge Archon",
            ActionKind::CancelNuke => "Cancel Nuke",
            ActionKind::CancelResearch => "Cancel Research",
            ActionKind::Stim => "Stim",
            ActionKind::MergeDarkArchon => "Merge Dark Archon",
            ActionKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// One decoded player action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Game frame the command was issued on
    pub frame: u32,
    /// Raw opcode byte
    pub opcode: u8,
    /// Canonical kind
    pub kind: ActionKind,
    /// Human-readable parameters
    pub parameters: String,
    /// Target or placement position
    pub position: Option<Position>,
    /// Unit type trained, built or morphed
    pub unit_id: Option<u16>,
    /// Order subtype, research/upgrade id, or morph target
    pub secondary_id: Option<u16>,
}

impl Action {
    /// Action with only parameters set
    pub fn new(frame: u32, opcode: u8, kind: ActionKind, parameters: impl Into<String>) -> Self {
        Self {
            frame,
            opcode,
            kind,
            parameters: parameters.into(),
            position: None,
            unit_id: None,
            secondary_id: None,
        }
    }

    pub fn with_position(mut self, x: u16, y: u16) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn with_unit(mut self, unit_id: u16) -> Self {
        self.unit_id = Some(unit_id);
        self
    }

    pub fn with_secondary(mut self, secondary_id: u16) -> Self {
        self.secondary_id = Some(secondary_id);
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8} {}", format_frames(self.frame, false), self.kind)?;
        if !self.parameters.is_empty() {
            write!(f, " {}", self.parameters)?;
        }
        Ok(())
    }
}
