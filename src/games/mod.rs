pub mod choice;
pub mod memory;
pub mod reaction;
pub mod roll;

pub struct GameDescriptor
{
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![GameDescriptor {
        name: "levels",
        description: "Rock-paper-scissors, memory match and catch-the-target, one level each",
    },
    GameDescriptor {
        name: "roll",
        description: "Random number from 0 to 99",
    }]
}
