use multiverse_lib::{WorldEnvironment, WorldType};

/// Describes how to create, or load from disk, a single world.
///
/// Built by chaining the field-named methods onto [`WorldCreationSettings::new`]. A settings
/// value is moved into the manager, so one value always describes one creation attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldCreationSettings {
    name: String,
    pub environment: WorldEnvironment,
    pub seed: Option<i64>,
    /// `None` lets the host pick its default, or keep the type of a world loaded from disk.
    pub world_type: Option<WorldType>,
    pub generate_structures: Option<bool>,
    pub generator: Option<String>,
    pub adjust_spawn: bool,
}

impl WorldCreationSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environment: WorldEnvironment::default(),
            seed: None,
            world_type: None,
            generate_structures: None,
            generator: None,
            adjust_spawn: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(mut self, environment: WorldEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed from user input, see [`parse_seed`].
    pub fn seed_text(mut self, text: &str) -> Self {
        self.seed = parse_seed(text);
        self
    }

    pub fn world_type(mut self, world_type: Option<WorldType>) -> Self {
        self.world_type = world_type;
        self
    }

    pub fn generate_structures(mut self, generate_structures: Option<bool>) -> Self {
        self.generate_structures = generate_structures;
        self
    }

    /// An empty generator id means no custom generator.
    pub fn generator(mut self, generator: Option<&str>) -> Self {
        self.generator = generator.filter(|g| !g.is_empty()).map(str::to_string);
        self
    }

    pub fn adjust_spawn(mut self, adjust_spawn: bool) -> Self {
        self.adjust_spawn = adjust_spawn;
        self
    }
}

/// Turns free-form seed input into a seed.
///
/// Empty input means no seed. Integers are taken as-is; anything else is hashed the way
/// Minecraft hashes textual seeds, so the same text always yields the same world.
pub fn parse_seed(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    Some(text.parse::<i64>().unwrap_or_else(|_| text_seed(text)))
}

/// Java's `String.hashCode` over UTF-16 code units, sign-extended to 64 bits.
pub fn text_seed(text: &str) -> i64 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32)) as i64
}
