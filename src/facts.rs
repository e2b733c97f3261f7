use rand::Rng;

pub const FACTS: [&str; 20] = [
    "As of September 2025 about 39,000 near-Earth objects are catalogued; roughly 11,300 are larger than 140 m and 870 larger than 1 km.",
    "Within a single month, a dozen near-Earth objects can pass closer to Earth than the Moon.",
    "A 140 m asteroid strikes roughly once every 20,000 years and leaves a 1-2 km crater.",
    "A 1 km object arrives about once every 500,000 years, with regional to continental consequences.",
    "Meteoroids enter the atmosphere at 11-72 km/s; about 20 km/s is typical.",
    "Energy scales with the square of speed: 50% faster means 2.25 times the energy.",
    "The 2013 Chelyabinsk airburst (~20 m body) released about 470-500 kt of TNT, some 30 Hiroshima bombs.",
    "Meteor Crater in Arizona is 1.2 km across and was dug by an iron body only about 50 m wide.",
    "Stony bodies around 50 m mostly explode in the air; iron bodies of 30-50 m already reach the ground.",
    "A 100 m stony asteroid at 20 km/s carries about 75 Mt of TNT, enough to flatten a city.",
    "A 140 m stony asteroid at 20 km/s carries 100-200 Mt of TNT.",
    "A 1 km stony asteroid at 20 km/s carries about 75,000 Mt; the 10 km Chicxulub impactor was near 72 teratons.",
    "In February 2023 a 1 m asteroid was predicted hours before it fell over France.",
    "The DART mission shortened the orbit of Dimorphos by 32-33 minutes.",
    "Six months of warning can be enough to nudge an impactor off a collision course with a push of a few cm/s.",
    "Entry angle sets how high an airburst happens and how wide the damage zones spread.",
    "Crater size grows nonlinearly with impactor size; target geology and angle matter a lot.",
    "Metre-resolution elevation models are detailed enough to model local tsunami inundation.",
    "NASA/JPL's Sentry system continuously rescans the catalogue and updates the impact-risk table.",
    "A few millimetres per second of velocity change, applied years early, becomes thousands of kilometres of miss distance.",
];

/// Picks one fact uniformly at random.
pub fn pick<R: Rng>(rng: &mut R) -> &'static str {
    FACTS[rng.gen_range(0..FACTS.len())]
}
