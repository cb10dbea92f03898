//! Read-only name tables for ids found in replays
//!
//! Tables are plain `static` slices indexed by id. The decoder receives a
//! `&NameTables` so callers can substitute localized tables without any
//! process-wide mutable state.

/// Unit type id of the three mineral field variants
pub const UNIT_MINERAL_FIELDS: [u16; 3] = [176, 177, 178];

/// Unit type id of a vespene geyser
pub const UNIT_VESPENE_GEYSER: u16 = 188;

/// Unit type id of a start location marker
pub const UNIT_START_LOCATION: u16 = 214;

/// Id → display name lookups used when synthesizing action parameters
#[derive(Debug, Clone, Copy)]
pub struct NameTables {
    /// Unit and building names, indexed by unit type id
    pub units: &'static [&'static str],
    /// Tech research names, indexed by research id
    pub research: &'static [&'static str],
    /// Upgrade names, indexed by upgrade id
    pub upgrades: &'static [&'static str],
    /// Game speed names, indexed by speed value
    pub speeds: &'static [&'static str],
}

static STANDARD: NameTables = NameTables {
    units: UNIT_NAMES,
    research: RESEARCH_NAMES,
    upgrades: UPGRADE_NAMES,
    speeds: GAME_SPEED_NAMES,
};

impl NameTables {
    /// English names shipped with the game
    pub fn standard() -> &'static NameTables {
        &STANDARD
    }

    /// Name of a unit type
    pub fn unit(&self, id: u16) -> Option<&'static str> {
        self.units.get(id as usize).copied()
    }

    /// Name of a tech research
    pub fn research(&self, id: u8) -> Option<&'static str> {
        self.research.get(id as usize).copied()
    }

    /// Name of an upgrade
    pub fn upgrade(&self, id: u8) -> Option<&'static str> {
        self.upgrades.get(id as usize).copied()
    }

    /// Name of a game speed
    pub fn speed(&self, value: u8) -> Option<&'static str> {
        self.speeds.get(value as usize).copied()
    }
}

impl Default for NameTables {
    fn default() -> Self {
        STANDARD
    }
}

/// Placeholder for ids missing from a table
pub const UNKNOWN_NAME: &str = "Unknown";

/// Game speed names
pub static GAME_SPEED_NAMES: &[&str] = &[
    "Slowest", "Slower", "Slow", "Normal", "Fast", "Faster", "Fastest",
];

/// Unit type names (ids 0..=227)
pub static UNIT_NAMES: &[&str] = &[
    // 0x00
    "Marine",
    "Ghost",
    "Vulture",
    "Goliath",
    "Goliath Turret",
    "Siege Tank (Tank Mode)",
    "Siege Tank Turret (Tank Mode)",
    "SCV",
    "Wraith",
    "Science Vessel",
    "Gui Montag",
    "Dropship",
    "Battlecruiser",
    "Spider Mine",
    "Nuclear Missile",
    "Civilian",
    // 0x10
    "Sarah Kerrigan",
    "Alan Schezar",
    "Alan Schezar Turret",
    "Jim Raynor (Vulture)",
    "Jim Raynor (Marine)",
    "Tom Kazansky",
    "Magellan",
    "Edmund Duke (Tank Mode)",
    "Edmund Duke Turret (Tank Mode)",
    "Edmund Duke (Siege Mode)",
    "Edmund Duke Turret (Siege Mode)",
    "Arcturus Mengsk",
    "Hyperion",
    "Norad II",
    "Siege Tank (Siege Mode)",
    "Siege Tank Turret (Siege Mode)",
    // 0x20
    "Firebat",
    "Scanner Sweep",
    "Medic",
    "Larva",
    "Egg",
    "Zergling",
    "Hydralisk",
    "Ultralisk",
    "Broodling",
    "Drone",
    "Overlord",
    "Mutalisk",
    "Guardian",
    "Queen",
    "Defiler",
    "Scourge",
    // 0x30
    "Torrasque",
    "Matriarch",
    "Infested Terran",
    "Infested Kerrigan",
    "Unclean One",
    "Hunter Killer",
    "Devouring One",
    "Kukulza (Mutalisk)",
    "Kukulza (Guardian)",
    "Yggdrasill",
    "Valkyrie",
    "Cocoon",
    "Corsair",
    "Dark Templar",
    "Devourer",
    "Dark Archon",
    // 0x40
    "Probe",
    "Zealot",
    "Dragoon",
    "High Templar",
    "Archon",
    "Shuttle",
    "Scout",
    "Arbiter",
    "Carrier",
    "Interceptor",
    "Dark Templar (Hero)",
    "Zeratul",
    "Tassadar/Zeratul",
    "Fenix (Zealot)",
    "Fenix (Dragoon)",
    "Tassadar",
    // 0x50
    "Mojo",
    "Warbringer",
    "Gantrithor",
    "Reaver",
    "Observer",
    "Scarab",
    "Danimoth",
    "Aldaris",
    "Artanis",
    "Rhynadon",
    "Bengalaas",
    "Cargo Ship",
    "Mercenary Gunship",
    "Scantid",
    "Kakaru",
    "Ragnasaur",
    // 0x60
    "Ursadon",
    "Lurker Egg",
    "Raszagal",
    "Samir Duran",
    "Alexei Stukov",
    "Map Revealer",
    "Gerard DuGalle",
    "Lurker",
    "Infested Duran",
    "Disruption Web",
    "Command Center",
    "Comsat Station",
    "Nuclear Silo",
    "Supply Depot",
    "Refinery",
    "Barracks",
    // 0x70
    "Academy",
    "Factory",
    "Starport",
    "Control Tower",
    "Science Facility",
    "Covert Ops",
    "Physics Lab",
    "Starbase",
    "Machine Shop",
    "Repair Bay",
    "Engineering Bay",
    "Armory",
    "Missile Turret",
    "Bunker",
    "Norad II (Crashed)",
    "Ion Cannon",
    // 0x80
    "Uraj Crystal",
    "Khalis Crystal",
    "Infested Command Center",
    "Hatchery",
    "Lair",
    "Hive",
    "Nydus Canal",
    "Hydralisk Den",
    "Defiler Mound",
    "Greater Spire",
    "Queen's Nest",
    "Evolution Chamber",
    "Ultralisk Cavern",
    "Spire",
    "Spawning Pool",
    "Creep Colony",
    // 0x90
    "Spore Colony",
    "Unused Zerg Building 1",
    "Sunken Colony",
    "Overmind (With Shell)",
    "Overmind",
    "Extractor",
    "Mature Chrysalis",
    "Cerebrate",
    "Cerebrate Daggoth",
    "Unused Zerg Building 2",
    "Nexus",
    "Robotics Facility",
    "Pylon",
    "Assimilator",
    "Unused Protoss Building 1",
    "Observatory",
    // 0xA0
    "Gateway",
    "Unused Protoss Building 2",
    "Photon Cannon",
    "Citadel of Adun",
    "Cybernetics Core",
    "Templar Archives",
    "Forge",
    "Stargate",
    "Stasis Cell/Prison",
    "Fleet Beacon",
    "Arbiter Tribunal",
    "Robotics Support Bay",
    "Shield Battery",
    "Khaydarin Crystal Formation",
    "Protoss Temple",
    "Xel'Naga Temple",
    // 0xB0
    "Mineral Field (Type 1)",
    "Mineral Field (Type 2)",
    "Mineral Field (Type 3)",
    "Cave",
    "Cave-in",
    "Cantina",
    "Mining Platform",
    "Independent Command Center",
    "Independent Starport",
    "Independent Jump Gate",
    "Ruins",
    "Khaydarin Crystal Formation (Unused)",
    "Vespene Geyser",
    "Warp Gate",
    "Psi Disrupter",
    "Zerg Marker",
    // 0xC0
    "Terran Marker",
    "Protoss Marker",
    "Zerg Beacon",
    "Terran Beacon",
    "Protoss Beacon",
    "Zerg Flag Beacon",
    "Terran Flag Beacon",
    "Protoss Flag Beacon",
    "Power Generator",
    "Overmind Cocoon",
    "Dark Swarm",
    "Floor Missile Trap",
    "Floor Hatch",
    "Left Upper Level Door",
    "Right Upper Level Door",
    "Left Pit Door",
    // 0xD0
    "Right Pit Door",
    "Floor Gun Trap",
    "Left Wall Missile Trap",
    "Left Wall Flame Trap",
    "Right Wall Missile Trap",
    "Right Wall Flame Trap",
    "Start Location",
    "Flag",
    "Young Chrysalis",
    "Psi Emitter",
    "Data Disk",
    "Khaydarin Crystal",
    "Mineral Cluster Type 1",
    "Mineral Cluster Type 2",
    "Protoss Vespene Gas Orb Type 1",
    "Protoss Vespene Gas Orb Type 2",
    // 0xE0
    "Zerg Vespene Gas Sac Type 1",
    "Zerg Vespene Gas Sac Type 2",
    "Terran Vespene Gas Tank Type 1",
    "Terran Vespene Gas Tank Type 2",
];

/// Tech research names (ids 0..=34)
pub static RESEARCH_NAMES: &[&str] = &[
    "Stim Packs",
    "Lockdown",
    "EMP Shockwave",
    "Spider Mines",
    "Scanner Sweep",
    "Tank Siege Mode",
    "Defensive Matrix",
    "Irradiate",
    "Yamato Gun",
    "Cloaking Field",
    "Personnel Cloaking",
    "Burrowing",
    "Infestation",
    "Spawn Broodlings",
    "Dark Swarm",
    "Plague",
    "Consume",
    "Ensnare",
    "Parasite",
    "Psionic Storm",
    "Hallucination",
    "Recall",
    "Stasis Field",
    "Archon Warp",
    "Restoration",
    "Disruption Web",
    "Unused Tech 26",
    "Mind Control",
    "Dark Archon Meld",
    "Feedback",
    "Optical Flare",
    "Maelstrom",
    "Lurker Aspect",
    "Unused Tech 33",
    "Healing",
];

/// Upgrade names (ids 0..=54)
pub static UPGRADE_NAMES: &[&str] = &[
    "Terran Infantry Armor",
    "Terran Vehicle Plating",
    "Terran Ship Plating",
    "Zerg Carapace",
    "Zerg Flyer Carapace",
    "Protoss Ground Armor",
    "Protoss Air Armor",
    "Terran Infantry Weapons",
    "Terran Vehicle Weapons",
    "Terran Ship Weapons",
    "Zerg Melee Attacks",
    "Zerg Missile Attacks",
    "Zerg Flyer Attacks",
    "Protoss Ground Weapons",
    "Protoss Air Weapons",
    "Protoss Plasma Shields",
    "U-238 Shells",
    "Ion Thrusters",
    "Burst Lasers",
    "Titan Reactor",
    "Ocular Implants",
    "Moebius Reactor",
    "Apollo Reactor",
    "Colossus Reactor",
    "Ventral Sacs",
    "Antennae",
    "Pneumatized Carapace",
    "Metabolic Boost",
    "Adrenal Glands",
    "Muscular Augments",
    "Grooved Spines",
    "Gamete Meiosis",
    "Metasynaptic Node",
    "Singularity Charge",
    "Leg Enhancements",
    "Scarab Damage",
    "Reaver Capacity",
    "Gravitic Drive",
    "Sensor Array",
    "Gravitic Boosters",
    "Khaydarin Amulet",
    "Apial Sensors",
    "Gravitic Thrusters",
    "Carrier Capacity",
    "Khaydarin Core",
    "Unused Upgrade 45",
    "Unused Upgrade 46",
    "Argus Jewel",
    "Unused Upgrade 48",
    "Argus Talisman",
    "Unused Upgrade 50",
    "Caduceus Reactor",
    "Chitinous Plating",
    "Anabolic Synthesis",
    "Charon Boosters",
];
