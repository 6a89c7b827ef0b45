//! Human-friendly random names for players and rooms.

use rand::seq::IndexedRandom;
use tictactoe_core::RoomId;

const ADJECTIVES: &[&str] = &[
    "amber", "ancient", "bold", "brave", "bright", "calm", "clever", "cold", "crimson", "curious",
    "damp", "dark", "eager", "early", "fancy", "gentle", "golden", "green", "hidden", "hollow",
    "icy", "jolly", "keen", "late", "lively", "lone", "lucky", "misty", "muddy", "noble", "odd",
    "pale", "proud", "quiet", "rapid", "restless", "rough", "rusty", "shy", "silent", "sleepy",
    "snowy", "steady", "swift", "tiny", "wandering", "wild", "young",
];

const NOUNS: &[&str] = &[
    "badger", "bay", "brook", "canyon", "cedar", "cliff", "cloud", "comet", "crane", "creek",
    "dawn", "dune", "eagle", "ember", "falcon", "fern", "field", "fox", "frost", "glade", "harbor",
    "hawk", "heron", "hill", "lake", "lynx", "maple", "meadow", "moon", "moth", "otter", "owl",
    "pine", "pond", "raven", "reef", "river", "sparrow", "spruce", "star", "stone", "storm",
    "thicket", "tide", "valley", "willow", "wolf", "wren",
];

/// `adjective-noun`, e.g. `misty-heron`.
pub fn display_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("nameless");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("player");
    format!("{adjective}-{noun}")
}

/// `room-adjective-noun`. Uniqueness is the registry's job.
pub fn room_id() -> RoomId {
    RoomId(format!("room-{}", display_name()))
}
