pub const POINTS_PER_GUEST: u32 = 10;
pub const GROUP_SIZE: u32 = 8;
pub const GROUP_BONUS: u32 = 50;
pub const LARGE_GROUP_SIZE: u32 = 15;
pub const LARGE_GROUP_BONUS: u32 = 100;

/// Points a member earns for a reservation of `guests` people.
pub fn points_for_reservation(guests: u32) -> u32 {
    if guests == 0 {
        return 0;
    }
    let mut points = guests * POINTS_PER_GUEST;
    if guests >= GROUP_SIZE {
        points += GROUP_BONUS;
    }
    if guests >= LARGE_GROUP_SIZE {
        points += LARGE_GROUP_BONUS;
    }
    points
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltyPreview {
    pub earned: u32,
    pub total: u32,
}

pub fn preview(guests: u32, current_points: u32) -> LoyaltyPreview {
    let earned = points_for_reservation(guests);
    LoyaltyPreview {
        earned,
        total: current_points.saturating_add(earned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_tiers() {
        assert_eq!(points_for_reservation(0), 0);
        assert_eq!(points_for_reservation(2), 20);
        assert_eq!(points_for_reservation(7), 70);
        assert_eq!(points_for_reservation(8), 130);
        assert_eq!(points_for_reservation(15), 300);
    }

    #[test]
    fn test_preview_adds_current_balance() {
        let p = preview(4, 120);
        assert_eq!(p.earned, 40);
        assert_eq!(p.total, 160);
    }
}
