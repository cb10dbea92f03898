//! Game clock conversions
//!
//! Replays count time in frames. At the "Fastest" game speed used by
//! ladder games one frame lasts 42 ms, which is the rate all clock strings
//! and the two-minute threshold are based on.

/// Duration of one frame at Fastest speed, in milliseconds
pub const FRAME_MILLIS: u64 = 42;

/// Number of frames in the first two minutes of game time
pub const FRAMES_IN_TWO_MINUTES: u32 = (2 * 60 * 1000 / FRAME_MILLIS) as u32;

/// Whole seconds of game time covered by `frames`
pub fn frames_to_seconds(frames: u32) -> u64 {
    frames as u64 * FRAME_MILLIS / 1000
}

/// Format a frame count as a game clock
///
/// The short form is `M:SS` and switches to `H:MM:SS` once the clock
/// passes an hour. `long` always produces `H:MM:SS`.
pub fn format_frames(frames: u32, long: bool) -> String {
    let total = frames_to_seconds(frames);
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    if long || hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
