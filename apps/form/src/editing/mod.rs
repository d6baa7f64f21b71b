// Skill-set and portfolio-link editing value types.

pub mod portfolio;
pub mod skills;

pub use portfolio::{project_for_submission, PortfolioLinks};
pub use skills::{SkillSet, PRESET_SKILLS};
