//! Three-word order names: number, adjective, noun.

use rand::Rng;

use crate::domain::foundation::{OrderSlug, ValidationError};

pub const NUMBERS: &[&str] = &[
    "zwei", "drei", "vier", "fuenf", "sechs", "sieben", "acht", "neun", "zehn", "elf", "zwoelf",
    "dreizehn", "vierzehn", "fuenfzehn", "sechzehn", "siebzehn", "achtzehn", "neunzehn",
    "zwanzig", "dreissig", "vierzig", "hundert",
];

pub const ADJECTIVES: &[&str] = &[
    "hungrige", "satte", "wilde", "muede", "flinke", "laute", "leise", "gruene", "rote", "blaue",
    "gelbe", "mutige", "schlaue", "freche", "zahme", "wuetende", "froehliche", "tapfere",
    "scheue", "kluge", "dicke", "duenne", "kleine", "grosse", "alte", "junge", "knusprige",
    "scharfe", "suesse", "salzige",
];

pub const NOUNS: &[&str] = &[
    "pinguine", "otter", "baeren", "fuechse", "eulen", "dachse", "igel", "hasen", "wale",
    "robben", "luchse", "woelfe", "elche", "biber", "raben", "kraehen", "spatzen", "enten",
    "gaense", "kraken", "hummer", "schnecken", "katzen", "hunde", "ziegen", "schafe", "esel",
    "lamas", "alpakas", "drachen",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words[rng.random_range(0..words.len())]
}

/// Draws one word uniformly from each list.
pub fn generate_slug<R: Rng + ?Sized>(rng: &mut R) -> Result<OrderSlug, ValidationError> {
    let number = pick(rng, NUMBERS);
    let adjective = pick(rng, ADJECTIVES);
    let noun = pick(rng, NOUNS);
    OrderSlug::from_words(number, adjective, noun)
}
