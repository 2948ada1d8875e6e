use serde::Serialize;

/// One fabricated usage record, serialized with the exact column headers the
/// viewer requires.
#[derive(Serialize)]
struct SampleRecord {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Used Device Id")]
    device_id: String,
    #[serde(rename = "Used Device Model")]
    device_model: String,
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "Region")]
    region: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let areas: [(&str, &str); 6] = [
        ("North", "EMEA"),
        ("South", "EMEA"),
        ("East", "APAC"),
        ("West", "AMER"),
        ("Central", "AMER"),
        ("Coastal", "APAC"),
    ];
    let authorized_models = ["SM-T295", "Walpad10HProMax"];
    let rogue_models = [
        "iPhone 15",
        "Galaxy S24",
        "Redmi Note 13",
        "Pixel 8",
        "iPad Air",
    ];

    let mut records = Vec::new();
    for _ in 0..400 {
        let &(area, region) = rng.pick(&areas);
        let username = format!("user{:02}", rng.range(40));
        let device_id = format!("DEV-{:04}", rng.range(250));

        let model = if rng.next_f64() < 0.7 {
            rng.pick(&authorized_models).to_string()
        } else {
            rng.pick(&rogue_models).to_string()
        };
        // Some exports wrap the model in quotes or pad it with whitespace;
        // the viewer is expected to clean these up.
        let device_model = match rng.range(10) {
            0 => format!("\"{model}\""),
            1 => format!("  {model} "),
            _ => model,
        };

        records.push(SampleRecord {
            username,
            device_id,
            device_model,
            area: area.to_string(),
            region: region.to_string(),
        });
    }

    // CSV
    let mut writer = csv::Writer::from_path("sample_data.csv").expect("Failed to create CSV file");
    for record in &records {
        writer.serialize(record).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // JSON (records-oriented)
    let json = serde_json::to_string_pretty(&records).expect("Failed to serialize JSON");
    std::fs::write("sample_data.json", json).expect("Failed to write JSON file");

    println!(
        "Wrote {} usage records to sample_data.csv and sample_data.json",
        records.len()
    );
}
