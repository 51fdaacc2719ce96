//! The built-in animal catalog.
//!
//! Two lists: `CORE` (the standard battery, mostly with bundled images) and
//! `EXTENDED` (resolved through external image sources).

use crate::item::Category::{self, *};
use crate::item::Tier::{self, *};
use crate::item::CatalogItem;

#[allow(clippy::too_many_arguments)]
const fn item(
    id: &'static str,
    name: &'static str,
    synonyms: &'static [&'static str],
    tier: Tier,
    category: Category,
    popularity: u8,
    asset: Option<&'static str>,
    search_phrase: &'static str,
) -> CatalogItem {
    CatalogItem {
        id,
        name,
        synonyms,
        tier,
        category,
        popularity,
        asset,
        search_phrase,
    }
}

#[rustfmt::skip]
pub static CORE: &[CatalogItem] = &[
    // Easy
    item("cat", "Cat", &["kitten", "feline"], Easy, Mammal, 10, Some("cat.jpg"), "cat"),
    item("dog", "Dog", &["puppy", "canine"], Easy, Mammal, 10, Some("dog.jpg"), "dog"),
    item("cow", "Cow", &["cattle", "bull"], Easy, Mammal, 9, Some("cow.jpg"), "cow"),
    item("horse", "Horse", &["stallion", "mare"], Easy, Mammal, 9, Some("horse.jpg"), "horse"),
    item("pig", "Pig", &["swine", "hog"], Easy, Mammal, 9, Some("pig.jpg"), "pig"),
    item("sheep", "Sheep", &["lamb", "ewe", "ram"], Easy, Mammal, 9, Some("sheep.jpg"), "sheep"),
    item("chicken", "Chicken", &["hen", "rooster"], Easy, Bird, 10, Some("chicken.jpg"), "chicken"),
    item("duck", "Duck", &["duckling"], Easy, Bird, 9, Some("duck.jpg"), "duck"),
    item("fish", "Fish", &["goldfish"], Easy, Fish, 10, Some("fish.jpg"), "fish"),
    item("rabbit", "Rabbit", &["bunny", "hare"], Easy, Mammal, 9, Some("rabbit.jpg"), "rabbit"),
    item("bird", "Bird", &["sparrow"], Easy, Bird, 10, Some("bird.jpg"), "bird"),
    item("mouse", "Mouse", &["mice"], Easy, Mammal, 8, Some("mouse.jpg"), "mouse"),
    item("frog", "Frog", &["toad"], Easy, Amphibian, 8, Some("frog.jpg"), "frog"),
    item("butterfly", "Butterfly", &[], Easy, Insect, 8, Some("butterfly.jpg"), "butterfly"),
    item("spider", "Spider", &[], Easy, Insect, 8, Some("spider.jpg"), "spider"),

    // Medium
    item("lion", "Lion", &[], Medium, Mammal, 7, Some("lion.jpg"), "lion"),
    item("tiger", "Tiger", &[], Medium, Mammal, 7, Some("tiger.jpg"), "tiger"),
    item("elephant", "Elephant", &[], Medium, Mammal, 7, Some("elephant.jpg"), "elephant"),
    item("giraffe", "Giraffe", &[], Medium, Mammal, 6, Some("giraffe.jpg"), "giraffe"),
    item("zebra", "Zebra", &[], Medium, Mammal, 6, Some("zebra.jpg"), "zebra"),
    item("monkey", "Monkey", &["ape", "chimp"], Medium, Mammal, 7, Some("monkey.jpg"), "monkey"),
    item("bear", "Bear", &[], Medium, Mammal, 7, Some("bear.jpg"), "bear"),
    item("wolf", "Wolf", &[], Medium, Mammal, 6, Some("wolf.jpg"), "wolf"),
    item("deer", "Deer", &["doe", "buck"], Medium, Mammal, 6, Some("deer.jpg"), "deer"),
    item("camel", "Camel", &["dromedary"], Medium, Mammal, 5, None, "camel"),
    item("rhinoceros", "Rhinoceros", &["rhino"], Medium, Mammal, 5, Some("rhino.jpg"), "rhinoceros"),
    item("hippopotamus", "Hippopotamus", &["hippo"], Medium, Mammal, 5, Some("hippo.jpg"), "hippopotamus"),
    item("kangaroo", "Kangaroo", &[], Medium, Mammal, 6, None, "kangaroo"),
    item("penguin", "Penguin", &[], Medium, Bird, 6, Some("penguin.jpg"), "penguin"),
    item("owl", "Owl", &[], Medium, Bird, 6, Some("owl.jpg"), "owl"),
    item("eagle", "Eagle", &[], Medium, Bird, 6, Some("eagle.jpg"), "eagle"),
    item("shark", "Shark", &[], Medium, Fish, 6, Some("shark.jpg"), "shark"),
    item("whale", "Whale", &[], Medium, Mammal, 6, Some("whale.jpg"), "whale"),
    item("dolphin", "Dolphin", &[], Medium, Mammal, 6, Some("dolphin.jpg"), "dolphin"),
    item("octopus", "Octopus", &[], Medium, Other, 5, None, "octopus"),

    // Hard; none of these ship an image
    item("pangolin", "Pangolin", &[], Hard, Mammal, 2, None, "pangolin"),
    item("quokka", "Quokka", &[], Hard, Mammal, 2, None, "quokka"),
    item("capybara", "Capybara", &[], Hard, Mammal, 3, None, "capybara"),
    item("axolotl", "Axolotl", &[], Hard, Amphibian, 2, None, "axolotl"),
    item("numbat", "Numbat", &[], Hard, Mammal, 2, None, "numbat"),
    item("tapir", "Tapir", &[], Hard, Mammal, 2, None, "tapir"),
    item("okapi", "Okapi", &[], Hard, Mammal, 2, None, "okapi"),
    item("aardvark", "Aardvark", &[], Hard, Mammal, 2, None, "aardvark"),
    item("echidna", "Echidna", &[], Hard, Mammal, 2, None, "echidna"),
    item("platypus", "Platypus", &[], Hard, Mammal, 3, None, "platypus"),
];

#[rustfmt::skip]
pub static EXTENDED: &[CatalogItem] = &[
    // Mammals
    item("llama", "Llama", &["alpaca"], Medium, Mammal, 4, None, "llama"),
    item("meerkat", "Meerkat", &[], Medium, Mammal, 4, None, "meerkat"),
    item("wombat", "Wombat", &[], Hard, Mammal, 2, None, "wombat"),
    item("koala", "Koala", &[], Medium, Mammal, 6, None, "koala"),
    item("sloth", "Sloth", &[], Medium, Mammal, 4, None, "sloth"),
    item("armadillo", "Armadillo", &[], Hard, Mammal, 3, None, "armadillo"),
    item("raccoon", "Raccoon", &[], Medium, Mammal, 5, None, "raccoon"),
    item("skunk", "Skunk", &[], Medium, Mammal, 4, None, "skunk"),
    item("porcupine", "Porcupine", &[], Medium, Mammal, 4, None, "porcupine"),
    item("hedgehog", "Hedgehog", &[], Medium, Mammal, 4, None, "hedgehog"),

    // Birds
    item("flamingo", "Flamingo", &[], Medium, Bird, 5, None, "flamingo"),
    item("peacock", "Peacock", &["peafowl"], Medium, Bird, 5, None, "peacock"),
    item("parrot", "Parrot", &[], Medium, Bird, 6, None, "parrot"),
    item("toucan", "Toucan", &[], Medium, Bird, 4, None, "toucan"),
    item("pelican", "Pelican", &[], Medium, Bird, 4, None, "pelican"),
    item("heron", "Heron", &[], Medium, Bird, 3, None, "heron"),
    item("crane", "Crane", &[], Medium, Bird, 3, None, "crane bird"),
    item("stork", "Stork", &[], Medium, Bird, 3, None, "stork"),
    item("swan", "Swan", &[], Medium, Bird, 5, None, "swan"),
    item("goose", "Goose", &[], Medium, Bird, 5, None, "goose"),

    // Reptiles
    item("snake", "Snake", &["serpent"], Easy, Reptile, 7, None, "snake"),
    item("lizard", "Lizard", &[], Medium, Reptile, 5, None, "lizard"),
    item("turtle", "Turtle", &["tortoise"], Easy, Reptile, 7, None, "turtle"),
    item("crocodile", "Crocodile", &["alligator"], Medium, Reptile, 5, None, "crocodile"),
    item("iguana", "Iguana", &[], Medium, Reptile, 4, None, "iguana"),
    item("gecko", "Gecko", &[], Medium, Reptile, 4, None, "gecko"),
    item("chameleon", "Chameleon", &[], Medium, Reptile, 4, None, "chameleon"),
    item("cobra", "Cobra", &[], Hard, Reptile, 3, None, "cobra"),
    item("python", "Python", &[], Hard, Reptile, 3, None, "python snake"),
    item("viper", "Viper", &[], Hard, Reptile, 2, None, "viper snake"),

    // Sea life
    item("seal", "Seal", &[], Medium, Mammal, 5, None, "seal"),
    item("walrus", "Walrus", &[], Medium, Mammal, 4, None, "walrus"),
    item("otter", "Otter", &[], Medium, Mammal, 4, None, "otter"),
    item("jellyfish", "Jellyfish", &[], Medium, Other, 5, None, "jellyfish"),
    item("starfish", "Starfish", &["sea star"], Medium, Other, 5, None, "starfish"),
    item("crab", "Crab", &[], Medium, Other, 6, None, "crab"),
    item("lobster", "Lobster", &[], Medium, Other, 5, None, "lobster"),
    item("shrimp", "Shrimp", &[], Medium, Other, 6, None, "shrimp"),
    item("seahorse", "Seahorse", &[], Medium, Fish, 4, None, "seahorse"),
    item("stingray", "Stingray", &[], Medium, Fish, 4, None, "stingray"),

    // Primates
    item("lemur", "Lemur", &[], Hard, Mammal, 3, None, "lemur"),
    item("gibbon", "Gibbon", &[], Hard, Mammal, 2, None, "gibbon"),
    item("orangutan", "Orangutan", &[], Hard, Mammal, 3, None, "orangutan"),
    item("chimpanzee", "Chimpanzee", &["chimp"], Medium, Mammal, 5, None, "chimpanzee"),
    item("gorilla", "Gorilla", &[], Medium, Mammal, 5, None, "gorilla"),
    item("baboon", "Baboon", &[], Hard, Mammal, 3, None, "baboon"),
    item("mandrill", "Mandrill", &[], Hard, Mammal, 2, None, "mandrill"),
    item("macaque", "Macaque", &[], Hard, Mammal, 2, None, "macaque"),

    // Savanna
    item("cheetah", "Cheetah", &[], Medium, Mammal, 5, None, "cheetah"),
    item("leopard", "Leopard", &[], Medium, Mammal, 4, None, "leopard"),
    item("hyena", "Hyena", &[], Medium, Mammal, 4, None, "hyena"),
    item("warthog", "Warthog", &[], Hard, Mammal, 2, None, "warthog"),
    item("wildebeest", "Wildebeest", &["gnu"], Hard, Mammal, 2, None, "wildebeest"),
    item("antelope", "Antelope", &[], Medium, Mammal, 4, None, "antelope"),
    item("gazelle", "Gazelle", &[], Hard, Mammal, 3, None, "gazelle"),
    item("impala", "Impala", &[], Hard, Mammal, 2, None, "impala"),

    // Raptors and songbirds
    item("vulture", "Vulture", &[], Medium, Bird, 4, None, "vulture"),
    item("falcon", "Falcon", &[], Medium, Bird, 4, None, "falcon"),
    item("hawk", "Hawk", &[], Medium, Bird, 4, None, "hawk"),
    item("condor", "Condor", &[], Hard, Bird, 2, None, "condor"),
    item("albatross", "Albatross", &[], Hard, Bird, 3, None, "albatross"),
    item("puffin", "Puffin", &[], Medium, Bird, 4, None, "puffin"),
    item("woodpecker", "Woodpecker", &[], Medium, Bird, 4, None, "woodpecker"),
    item("hummingbird", "Hummingbird", &[], Medium, Bird, 5, None, "hummingbird"),
    item("robin", "Robin", &[], Medium, Bird, 5, None, "robin bird"),
    item("cardinal", "Cardinal", &[], Medium, Bird, 4, None, "cardinal bird"),

    // Cold climates
    item("polar bear", "Polar Bear", &[], Medium, Mammal, 5, None, "polar bear"),
    item("arctic fox", "Arctic Fox", &[], Hard, Mammal, 3, None, "arctic fox"),
    item("reindeer", "Reindeer", &["caribou"], Medium, Mammal, 4, None, "reindeer"),
    item("moose", "Moose", &["elk"], Medium, Mammal, 4, None, "moose"),
    item("musk ox", "Musk Ox", &[], Hard, Mammal, 2, None, "musk ox"),

    // Insects
    item("ant", "Ant", &[], Easy, Insect, 8, None, "ant"),
    item("bee", "Bee", &[], Easy, Insect, 8, None, "bee"),
    item("wasp", "Wasp", &[], Medium, Insect, 6, None, "wasp"),
    item("beetle", "Beetle", &[], Medium, Insect, 5, None, "beetle"),
    item("grasshopper", "Grasshopper", &[], Medium, Insect, 5, None, "grasshopper"),
    item("cricket", "Cricket", &[], Medium, Insect, 5, None, "cricket insect"),
    item("dragonfly", "Dragonfly", &[], Medium, Insect, 4, None, "dragonfly"),
    item("ladybug", "Ladybug", &["ladybird"], Medium, Insect, 6, None, "ladybug"),
    item("praying mantis", "Praying Mantis", &["mantis"], Hard, Insect, 3, None, "praying mantis"),
    item("scorpion", "Scorpion", &[], Medium, Other, 4, None, "scorpion"),

    // Farm
    item("goat", "Goat", &[], Easy, Mammal, 8, None, "goat"),
    item("turkey", "Turkey", &[], Medium, Bird, 6, None, "turkey bird"),
    item("rooster", "Rooster", &[], Medium, Bird, 6, None, "rooster"),
    item("donkey", "Donkey", &["mule"], Medium, Mammal, 5, None, "donkey"),
    item("mule", "Mule", &[], Medium, Mammal, 4, None, "mule"),

    // Fish
    item("salmon", "Salmon", &[], Medium, Fish, 6, None, "salmon"),
    item("tuna", "Tuna", &[], Medium, Fish, 6, None, "tuna fish"),
    item("trout", "Trout", &[], Medium, Fish, 5, None, "trout"),
    item("bass", "Bass", &[], Medium, Fish, 4, None, "bass fish"),
    item("catfish", "Catfish", &[], Medium, Fish, 4, None, "catfish"),
    item("anglerfish", "Anglerfish", &[], Hard, Fish, 2, None, "anglerfish"),
    item("pufferfish", "Pufferfish", &[], Hard, Fish, 3, None, "pufferfish"),
    item("swordfish", "Swordfish", &[], Medium, Fish, 4, None, "swordfish"),

    // Pets and rarities
    item("fennec fox", "Fennec Fox", &[], Hard, Mammal, 2, None, "fennec fox"),
    item("sugar glider", "Sugar Glider", &[], Hard, Mammal, 2, None, "sugar glider"),
    item("chinchilla", "Chinchilla", &[], Hard, Mammal, 3, None, "chinchilla"),
    item("ferret", "Ferret", &[], Medium, Mammal, 4, None, "ferret"),
    item("hamster", "Hamster", &[], Medium, Mammal, 6, None, "hamster"),
    item("guinea pig", "Guinea Pig", &[], Medium, Mammal, 5, None, "guinea pig"),
    item("gerbil", "Gerbil", &[], Medium, Mammal, 4, None, "gerbil"),
];
