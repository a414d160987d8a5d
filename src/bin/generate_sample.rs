use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;

const OUTPUT_PATH: &str = "Most Streamed Spotify Songs 2024.csv";

const ARTISTS: &[&str] = &[
    "Tommy Richman",
    "Kendrick Lamar",
    "Sabrina Carpenter",
    "Billie Eilish",
    "Beyoncé",
    "ROSALÍA",
    "Bad Bunny",
    "Taylor Swift",
    "Benson Boone",
    "Hozier",
    "Teddy Swims",
    "Djo",
];

const WORDS: &[&str] = &[
    "Million", "Dollar", "Baby", "Espresso", "Lovin", "Birds", "Feather", "Beautiful",
    "Things", "Lose", "Control", "End", "Beginning", "Too", "Sweet", "Texas", "Hold", "Em",
    "Despechá", "Monaco", "Fortnight", "Please", "Please", "Not", "Like", "Us",
];

/// splitmix64 stream. The sample file only needs to be reproducible.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

/// `1234567` → `"1,234,567"`.
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SampleRng(2024);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "Track",
            "Album Name",
            "Artist",
            "Release Date",
            "Track Score",
            "Spotify Streams",
            "TikTok Views",
        ])
        .context("writing header")?;

    let n_rows = 60;
    for rank in 0..n_rows {
        let track = format!("{} {}", rng.pick(WORDS), rng.pick(WORDS));
        let album = format!("{} {}", rng.pick(WORDS), rng.pick(WORDS));
        let artist = rng.pick(ARTISTS);
        let release = format!("{}/{}/2024", 1 + rng.below(12), 1 + rng.below(28));

        // Streams fall off with rank, TikTok views are noisier.
        let decay = 1.0 / (1.0 + rank as f64 * 0.08);
        let streams = (4.0e9 * decay * (0.6 + 0.4 * rng.unit())) as u64;
        let tiktok = 10f64.powf(5.0 + 5.0 * rng.unit()) as u64;
        let score = format!("{:.1}", 725.0 * decay);

        // A few cells the loader has to treat as absent.
        let streams_cell = if rank % 17 == 16 { String::new() } else { with_thousands(streams) };
        let tiktok_cell = if rank % 11 == 10 { "N/A".to_string() } else { with_thousands(tiktok) };

        writer
            .write_record([
                track.as_str(),
                album.as_str(),
                artist,
                release.as_str(),
                score.as_str(),
                streams_cell.as_str(),
                tiktok_cell.as_str(),
            ])
            .with_context(|| format!("writing row {rank}"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV: {}", e.error()))?;
    let text = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    let (encoded, _, unmappable) = WINDOWS_1252.encode(&text);
    if unmappable {
        log::warn!("some characters could not be encoded as windows-1252");
    }

    std::fs::write(OUTPUT_PATH, &encoded).with_context(|| format!("writing {OUTPUT_PATH}"))?;

    println!("Wrote {n_rows} tracks to {OUTPUT_PATH} (windows-1252)");
    Ok(())
}
