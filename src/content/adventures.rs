//! Adventure (random event) definitions.

use crate::character::attributes::StatBonus;
use crate::economy::rewards::RewardBundle;
use std::borrow::Cow;

/// Adventure offered automatically after a breakthrough by a sectless character.
pub const SECT_RECRUITMENT_ADVENTURE_ID: u32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct AdventureOutcome {
    pub succeeds: bool,
    pub message: &'static str,
    pub rewards: Option<RewardBundle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdventureOption {
    pub id: u32,
    pub text: &'static str,
    pub outcome: AdventureOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adventure {
    pub id: u32,
    pub title: &'static str,
    pub prompt: &'static str,
    /// False for events that only appear through a trigger, never a random draw.
    pub random_draw: bool,
    pub options: [AdventureOption; 2],
}

impl Adventure {
    pub fn option(&self, id: u32) -> Option<&AdventureOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

const fn success(id: u32, text: &'static str, message: &'static str, rewards: RewardBundle) -> AdventureOption {
    AdventureOption {
        id,
        text,
        outcome: AdventureOutcome {
            succeeds: true,
            message,
            rewards: Some(rewards),
        },
    }
}

const fn decline(id: u32, text: &'static str, message: &'static str) -> AdventureOption {
    AdventureOption {
        id,
        text,
        outcome: AdventureOutcome {
            succeeds: false,
            message,
            rewards: None,
        },
    }
}

const fn sect_reward(sect: &'static str, experience: u64, currency: u64, age_limit: u32, attributes: StatBonus) -> RewardBundle {
    RewardBundle {
        experience,
        currency,
        rare_currency: 0,
        consumables: 0,
        age_limit,
        companion: None,
        sect: Some(Cow::Borrowed(sect)),
        attributes,
    }
}

pub static ADVENTURES: [Adventure; 7] = [
    Adventure {
        id: 1,
        title: "神秘洞府",
        prompt: "洞府入口布满青苔，依稀可见\"仙人居\"三个大字。洞中可能藏有珍贵宝藏，也可能有凶险机关。",
        random_draw: true,
        options: [
            success(1, "小心探索", "你谨慎地探索了洞府，发现了一些丹药和灵石！", RewardBundle::resources(50, 100, 5, 2)),
            decline(2, "无视离去", "你离开了洞府，错过了其中的宝藏。"),
        ],
    },
    Adventure {
        id: 2,
        title: "受伤修士",
        prompt: "这位修士面色苍白，衣衫褴褛，显然受了重伤。他似乎有重要的事情要告诉你。",
        random_draw: true,
        options: [
            success(
                1,
                "出手相助",
                "你救下了这位修士，他感激地传授了你一些修炼心得！",
                RewardBundle {
                    experience: 100,
                    currency: 0,
                    rare_currency: 0,
                    consumables: 0,
                    age_limit: 0,
                    companion: None,
                    sect: None,
                    attributes: StatBonus::new(5, 3, 0, 0.0),
                },
            ),
            decline(2, "无视离去", "你没有理会这位修士，继续你的旅程。"),
        ],
    },
    Adventure {
        id: 3,
        title: "灵兽幼崽",
        prompt: "一只小灵兽蜷缩在路边，似乎受了伤。它看起来很可爱，眼神中充满了求救的渴望。",
        random_draw: true,
        options: [
            success(
                1,
                "救治灵兽",
                "你救治了这只灵兽，它决定跟随你踏上修仙之路！",
                RewardBundle {
                    experience: 80,
                    currency: 0,
                    rare_currency: 0,
                    consumables: 0,
                    age_limit: 0,
                    companion: Some(Cow::Borrowed("灵狐")),
                    sect: None,
                    attributes: StatBonus::NONE,
                },
            ),
            decline(2, "无视离去", "你没有理会这只灵兽，继续前行。"),
        ],
    },
    Adventure {
        id: 4,
        title: "门派招新",
        prompt: "一群修士正在招揽新人，他们穿着统一服饰，似乎来自一个颇有实力的门派。",
        random_draw: true,
        options: [
            success(
                1,
                "加入门派",
                "你成功加入了青云门，获得了门派的庇护和资源！",
                sect_reward("青云门", 150, 200, 30, StatBonus::NONE),
            ),
            decline(2, "保持独立", "你决定保持独立修炼，继续你的散修之路。"),
        ],
    },
    Adventure {
        id: 5,
        title: "天降灵雨",
        prompt: "天空中忽然下起了一场灵雨，每一滴雨珠都蕴含着充沛的灵气。这是一个难得的修炼机会！",
        random_draw: true,
        options: [
            success(1, "借机修炼", "你在灵雨中修炼，修为大幅提升！", RewardBundle::resources(200, 0, 0, 5)),
            success(2, "收集灵雨", "你用容器收集了灵雨，获得了珍贵的丹药！", RewardBundle::resources(0, 0, 10, 10)),
        ],
    },
    Adventure {
        id: 6,
        title: "天剑宗招徒",
        prompt: "一位天剑宗的长老看出你资质不凡，邀请你加入天剑宗。天剑宗是修仙界的顶级门派之一。",
        random_draw: true,
        options: [
            success(
                1,
                "加入天剑宗",
                "你成功加入了天剑宗，获得了强大的剑法传承！",
                sect_reward("天剑宗", 300, 500, 50, StatBonus::new(10, 5, 0, 0.0)),
            ),
            decline(2, "婉拒", "你婉拒了长老的邀请，继续你的修行之路。"),
        ],
    },
    Adventure {
        id: SECT_RECRUITMENT_ADVENTURE_ID,
        title: "门派招贤",
        prompt: "你的境界突破引起了门派的注意，有门派派人前来招贤纳士。",
        random_draw: false,
        options: [
            success(
                1,
                "加入门派",
                "你加入了门派，获得了门派的资源庇护！",
                sect_reward("青云门", 300, 500, 0, StatBonus::NONE),
            ),
            decline(2, "继续散修", "你选择了继续散修，保持自由。"),
        ],
    },
];

pub fn get_adventure(id: u32) -> Option<&'static Adventure> {
    ADVENTURES.iter().find(|a| a.id == id)
}

/// Pool for uniform random draws.
pub fn drawable_adventures() -> Vec<&'static Adventure> {
    ADVENTURES.iter().filter(|a| a.random_draw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let mut ids: Vec<_> = ADVENTURES.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ADVENTURES.len());
    }

    #[test]
    fn test_recruitment_not_in_random_pool() {
        assert!(get_adventure(SECT_RECRUITMENT_ADVENTURE_ID).is_some());
        assert!(drawable_adventures()
            .iter()
            .all(|a| a.id != SECT_RECRUITMENT_ADVENTURE_ID));
        assert_eq!(drawable_adventures().len(), 6);
    }

    #[test]
    fn test_successful_options_carry_rewards() {
        for adventure in ADVENTURES.iter() {
            for option in adventure.options.iter() {
                assert_eq!(option.outcome.succeeds, option.outcome.rewards.is_some());
            }
        }
    }

    #[test]
    fn test_spirit_rain_has_two_successes() {
        let rain = get_adventure(5).unwrap();
        assert!(rain.option(1).unwrap().outcome.succeeds);
        assert!(rain.option(2).unwrap().outcome.succeeds);
        assert!(rain.option(3).is_none());
    }
}
