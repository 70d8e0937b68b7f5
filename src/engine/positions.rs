use crate::domain::{Player, SeatIndex};

/// Места по часовой стрелке, начиная со `start` (включительно).
pub fn clockwise_from(len: usize, start: SeatIndex) -> impl Iterator<Item = SeatIndex> {
    let start = if len == 0 { 0 } else { start % len };
    (0..len).map(move |i| (start + i) % len)
}

/// Найти следующее место по кругу, удовлетворяющее условию (включая/исключая start).
pub fn next_seat_where<F>(
    players: &[Player],
    start: SeatIndex,
    include_start: bool,
    pred: F,
) -> Option<SeatIndex>
where
    F: Fn(&Player) -> bool,
{
    let len = players.len();
    if len == 0 {
        return None;
    }
    let first = if include_start { start } else { start + 1 };

    clockwise_from(len, first).find(|&seat| pred(&players[seat]))
}

/// Кто получит кнопку в следующей раздаче: первый по часовой после
/// текущей кнопки, кто не уходит из-за стола.
pub fn next_button_holder(
    players: &[Player],
    button: SeatIndex,
    leaving: &[String],
) -> Option<String> {
    next_seat_where(players, button, false, |p| !leaving.contains(&p.name))
        .map(|seat| players[seat].name.clone())
}
