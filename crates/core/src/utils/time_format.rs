/// Formats an elapsed-seconds count as `HH:MM:SS`.
///
/// Minutes and seconds are always two digits. Hours are padded to at least two
/// digits and grow past that without truncation (`100:00:00`).
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
