use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "amber", "brisk", "cedar", "dusky", "early", "frosty", "gentle", "hazel",
    "ivory", "jade", "lunar", "mellow", "navy", "opal", "pale", "quiet",
];

const NOUNS: &[&str] = &[
    "arch", "brook", "cliff", "dune", "field", "grove", "harbor", "isle",
    "knoll", "ledge", "meadow", "notch", "orchard", "pond", "ridge", "shore",
];

pub fn generate_session_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{}-{}-{:03}", adjective, noun, rng.random_range(0..1000u32))
}
