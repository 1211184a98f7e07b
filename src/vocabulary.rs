use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

/// One glossary entry. The core only reads these; editing the glossary is
/// the vocabulary service's job.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VocabWord {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub category: String,
    pub difficulty: Difficulty,
}

/// Read-only access to word metadata, used when building questions and when
/// evaluating category-mastery achievements.
pub trait VocabularyProvider {
    fn word(&self, id: &str) -> Option<&VocabWord>;

    fn category_of(&self, id: &str) -> Option<&str> {
        self.word(id).map(|w| w.category.as_str())
    }
}

/// In-memory glossary backing the default setup and the tests.
pub struct Glossary {
    words: Vec<VocabWord>,
}

impl Glossary {
    pub fn new(words: Vec<VocabWord>) -> Self {
        Self { words }
    }

    /// Starter set of Web3/DeFi terms so the trainer works out of the box.
    pub fn builtin() -> Self {
        fn entry(
            id: &str,
            term: &str,
            definition: &str,
            category: &str,
            difficulty: Difficulty,
        ) -> VocabWord {
            VocabWord {
                id: id.to_string(),
                term: term.to_string(),
                definition: definition.to_string(),
                category: category.to_string(),
                difficulty,
            }
        }

        Self::new(vec![
            entry(
                "wallet",
                "Wallet",
                "Software or hardware that stores the keys controlling on-chain assets.",
                "infrastructure",
                Difficulty::Beginner,
            ),
            entry(
                "gas",
                "Gas",
                "The fee paid to execute a transaction or contract call on-chain.",
                "infrastructure",
                Difficulty::Beginner,
            ),
            entry(
                "smart-contract",
                "Smart Contract",
                "Code deployed on a blockchain that runs automatically when its conditions are met.",
                "infrastructure",
                Difficulty::Beginner,
            ),
            entry(
                "stablecoin",
                "Stablecoin",
                "A token pegged to the value of an external asset, usually a fiat currency.",
                "defi",
                Difficulty::Beginner,
            ),
            entry(
                "staking",
                "Staking",
                "Locking tokens to secure a network in exchange for rewards.",
                "defi",
                Difficulty::Beginner,
            ),
            entry(
                "dex",
                "DEX",
                "An exchange that settles trades on-chain without a central custodian.",
                "defi",
                Difficulty::Intermediate,
            ),
            entry(
                "liquidity-pool",
                "Liquidity Pool",
                "A contract holding paired token reserves that traders swap against.",
                "defi",
                Difficulty::Intermediate,
            ),
            entry(
                "yield-farming",
                "Yield Farming",
                "Moving assets between protocols to chase the best reward rates.",
                "defi",
                Difficulty::Intermediate,
            ),
            entry(
                "amm",
                "AMM",
                "A pricing mechanism that quotes swaps from pool reserves instead of an order book.",
                "defi",
                Difficulty::Advanced,
            ),
            entry(
                "impermanent-loss",
                "Impermanent Loss",
                "The value shortfall a liquidity provider suffers when pooled prices diverge.",
                "defi",
                Difficulty::Advanced,
            ),
            entry(
                "slippage",
                "Slippage",
                "The difference between the quoted and executed price of a trade.",
                "trading",
                Difficulty::Intermediate,
            ),
            entry(
                "dao",
                "DAO",
                "An organization governed by token holders voting on-chain.",
                "governance",
                Difficulty::Intermediate,
            ),
            entry(
                "governance-token",
                "Governance Token",
                "A token granting voting power over a protocol's parameters.",
                "governance",
                Difficulty::Intermediate,
            ),
            entry(
                "nft",
                "NFT",
                "A unique on-chain token representing ownership of a specific item.",
                "nft",
                Difficulty::Beginner,
            ),
        ])
    }

    pub fn words(&self) -> &[VocabWord] {
        &self.words
    }

    pub fn words_in_category(&self, category: &str) -> Vec<&VocabWord> {
        self.words
            .iter()
            .filter(|w| w.category == category)
            .collect()
    }
}

impl VocabularyProvider for Glossary {
    fn word(&self, id: &str) -> Option<&VocabWord> {
        self.words.iter().find(|w| w.id == id)
    }
}
