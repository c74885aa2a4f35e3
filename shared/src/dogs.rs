use serde::{Deserialize, Serialize};

pub const DOG_API_BASE: &str = "https://dog.ceo/api";

/// Breed catalog shipped with the client so the selectors render without a
/// round trip. Mirrors the Dog CEO `/breeds/list/all` payload.
pub const BREEDS: &[(&str, &[&str])] = &[
    ("affenpinscher", &[]),
    ("african", &["wild"]),
    ("airedale", &[]),
    ("akita", &[]),
    ("appenzeller", &[]),
    ("australian", &["kelpie", "shepherd"]),
    ("bakharwal", &["indian"]),
    ("basenji", &[]),
    ("beagle", &[]),
    ("bluetick", &[]),
    ("borzoi", &[]),
    ("bouvier", &[]),
    ("boxer", &[]),
    ("brabancon", &[]),
    ("briard", &[]),
    ("buhund", &["norwegian"]),
    ("bulldog", &["boston", "english", "french"]),
    ("bullterrier", &["staffordshire"]),
    ("cattledog", &["australian"]),
    ("cavapoo", &[]),
    ("chihuahua", &[]),
    ("chippiparai", &["indian"]),
    ("chow", &[]),
    ("clumber", &[]),
    ("cockapoo", &[]),
    ("collie", &["border"]),
    ("coonhound", &[]),
    ("corgi", &["cardigan"]),
    ("cotondetulear", &[]),
    ("dachshund", &[]),
    ("dalmatian", &[]),
    ("dane", &["great"]),
    ("danish", &["swedish"]),
    ("deerhound", &["scottish"]),
    ("dhole", &[]),
    ("dingo", &[]),
    ("doberman", &[]),
    ("elkhound", &["norwegian"]),
    ("entlebucher", &[]),
    ("eskimo", &[]),
    ("finnish", &["lapphund"]),
    ("frise", &["bichon"]),
    ("gaddi", &["indian"]),
    ("german", &["shepherd"]),
    ("greyhound", &["indian", "italian"]),
    ("groenendael", &[]),
    ("havanese", &[]),
    (
        "hound",
        &["afghan", "basset", "blood", "english", "ibizan", "plott", "walker"],
    ),
    ("husky", &[]),
    ("keeshond", &[]),
    ("kelpie", &[]),
    ("kombai", &[]),
    ("komondor", &[]),
    ("kuvasz", &[]),
    ("labradoodle", &[]),
    ("labrador", &[]),
    ("leonberg", &[]),
    ("lhasa", &[]),
    ("malamute", &[]),
    ("malinois", &[]),
    ("maltese", &[]),
    ("mastiff", &["bull", "english", "indian", "tibetan"]),
    ("mexicanhairless", &[]),
    ("mix", &[]),
    ("mountain", &["bernese", "swiss"]),
    ("mudhol", &["indian"]),
    ("newfoundland", &[]),
    ("otterhound", &[]),
    ("ovcharka", &["caucasian"]),
    ("papillon", &[]),
    ("pariah", &["indian"]),
    ("pekinese", &[]),
    ("pembroke", &[]),
    ("pinscher", &["miniature"]),
    ("pitbull", &[]),
    ("pointer", &["german", "germanlonghair"]),
    ("pomeranian", &[]),
    ("poodle", &["medium", "miniature", "standard", "toy"]),
    ("pug", &[]),
    ("puggle", &[]),
    ("pyrenees", &[]),
    ("rajapalayam", &["indian"]),
    ("redbone", &[]),
    ("retriever", &["chesapeake", "curly", "flatcoated", "golden"]),
    ("ridgeback", &["rhodesian"]),
    ("rottweiler", &[]),
    ("rough", &["collie"]),
    ("saluki", &[]),
    ("samoyed", &[]),
    ("schipperke", &[]),
    ("schnauzer", &["giant", "miniature"]),
    ("segugio", &["italian"]),
    ("setter", &["english", "gordon", "irish"]),
    ("sharpei", &[]),
    ("sheepdog", &["english", "indian", "shetland"]),
    ("shiba", &[]),
    ("shihtzu", &[]),
    (
        "spaniel",
        &["blenheim", "brittany", "cocker", "irish", "japanese", "sussex", "welsh"],
    ),
    ("spitz", &["indian", "japanese"]),
    ("springer", &["english"]),
    ("stbernard", &[]),
    (
        "terrier",
        &[
            "american",
            "andalusian",
            "australian",
            "bedlington",
            "border",
            "boston",
            "cairn",
            "dandie",
            "fox",
            "irish",
            "kerryblue",
            "lakeland",
            "norfolk",
            "norwich",
            "patterdale",
            "russell",
            "scottish",
            "sealyham",
            "silky",
            "tibetan",
            "toy",
            "welsh",
            "westhighland",
            "wheaten",
            "yorkshire",
        ],
    ),
    ("tervuren", &[]),
    ("vizsla", &[]),
    ("waterdog", &["spanish"]),
    ("weimaraner", &[]),
    ("whippet", &[]),
    ("wolfhound", &["irish"]),
];

/// Sub-breeds for a breed, empty for unknown breeds.
pub fn sub_breeds(breed: &str) -> &'static [&'static str] {
    BREEDS
        .iter()
        .find(|(name, _)| *name == breed)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

/// Single random image URL, narrowed by breed and sub-breed path segments when
/// selected.
pub fn random_image_url(breed: Option<&str>, sub_breed: Option<&str>) -> String {
    match (breed, sub_breed) {
        (Some(breed), Some(sub)) => format!("{DOG_API_BASE}/breed/{breed}/{sub}/images/random"),
        (Some(breed), None) => format!("{DOG_API_BASE}/breed/{breed}/images/random"),
        _ => format!("{DOG_API_BASE}/breeds/image/random"),
    }
}

/// Full image list URL for a breed (optionally one sub-breed).
pub fn breed_images_url(breed: &str, sub_breed: Option<&str>) -> String {
    match sub_breed {
        Some(sub) => format!("{DOG_API_BASE}/breed/{breed}/{sub}/images"),
        None => format!("{DOG_API_BASE}/breed/{breed}/images"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomDogResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedImagesResponse {
    pub message: Vec<String>,
    pub status: String,
}

impl BreedImagesResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Selector label for a lowercase breed identifier.
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
