//! Monster roster.

/// Independent per-victory drop probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRates {
    pub rare_currency: f64,
    pub consumable: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub id: u32,
    pub name: &'static str,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp_reward: u64,
    pub currency_reward: u64,
    pub drop_rates: DropRates,
}

const fn monster(
    id: u32,
    name: &'static str,
    level: u32,
    stats: (u32, u32, u32),
    rewards: (u64, u64),
    drops: (f64, f64),
) -> Monster {
    Monster {
        id,
        name,
        level,
        hp: stats.0,
        attack: stats.1,
        defense: stats.2,
        exp_reward: rewards.0,
        currency_reward: rewards.1,
        drop_rates: DropRates {
            rare_currency: drops.0,
            consumable: drops.1,
        },
    }
}

/// Ordered by level.
pub static MONSTERS: [Monster; 10] = [
    monster(1, "山妖", 1, (50, 5, 2), (10, 5), (0.2, 0.1)),
    monster(2, "野狼", 3, (80, 8, 3), (20, 10), (0.25, 0.15)),
    monster(3, "狐妖", 5, (120, 12, 5), (35, 18), (0.3, 0.2)),
    monster(4, "猛虎", 8, (180, 18, 8), (60, 30), (0.35, 0.25)),
    monster(5, "妖狼王", 10, (250, 25, 12), (100, 50), (0.4, 0.3)),
    monster(6, "蛇妖", 15, (350, 35, 18), (150, 80), (0.45, 0.35)),
    monster(7, "赤炎兽", 20, (500, 50, 25), (250, 120), (0.5, 0.4)),
    monster(8, "玄冰兽", 25, (700, 70, 35), (400, 180), (0.55, 0.45)),
    monster(9, "雷兽", 30, (1000, 100, 50), (600, 250), (0.6, 0.5)),
    monster(10, "魔王", 35, (1500, 150, 75), (1000, 400), (0.7, 0.6)),
];

pub fn get_monster(id: u32) -> Option<&'static Monster> {
    MONSTERS.iter().find(|m| m.id == id)
}

/// Monsters a character of `level` may face: `monster.level <= level + window`.
pub fn eligible_monsters(level: u32, window: u32) -> Vec<&'static Monster> {
    let cap = level.saturating_add(window);
    MONSTERS.iter().filter(|m| m.level <= cap).collect()
}
