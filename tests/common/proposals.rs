use roi_inspect::types::{BoundingBox, Proposal, ProposalSource};

/// Small deterministic linear congruential generator.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next_u32() % (hi - lo) as u32) as i32
    }

    pub fn unit(&mut self) -> f32 {
        (self.next_u32() % 1001) as f32 / 1000.0
    }
}

/// `count` proposals clustered on a small canvas so many of them overlap.
pub fn random_proposals(rng: &mut Lcg, count: usize) -> Vec<Proposal> {
    (0..count)
        .map(|i| {
            let source = match rng.next_u32() % 3 {
                0 => ProposalSource::DenseCaptions,
                1 => ProposalSource::Objects,
                _ => ProposalSource::Other("people".to_string()),
            };
            let bbox = BoundingBox::new(
                rng.range(0, 120),
                rng.range(0, 120),
                rng.range(0, 60),
                rng.range(0, 60),
            );
            Proposal::new(source, format!("p{i}"), rng.unit(), bbox)
        })
        .collect()
}
