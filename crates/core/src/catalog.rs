//! Module catalog - the immutable, ordered seed of a track.

use crate::error::{CoreError, Result};
use crate::id::ModuleId;
use crate::module::Module;

/// Ordered list of module definitions for one track.
///
/// The catalog never changes after construction; it only seeds fresh
/// progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCatalog {
    entries: Vec<(ModuleId, String)>,
}

impl ModuleCatalog {
    /// Build a catalog from `(id, title)` pairs.
    ///
    /// Ids must be positive, unique and ascend by exactly one, since
    /// completing module `k` only ever unlocks `k + 1`.
    pub fn new<I, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ModuleId, T)>,
        T: Into<String>,
    {
        let entries: Vec<(ModuleId, String)> = entries
            .into_iter()
            .map(|(id, title)| (id, title.into()))
            .collect();

        if entries.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }

        for (i, (id, _)) in entries.iter().enumerate() {
            if id.get() == 0 {
                return Err(CoreError::NonPositiveModuleId(*id));
            }
            if i > 0 {
                let previous = entries[i - 1].0;
                if previous == *id {
                    return Err(CoreError::DuplicateModuleId(*id));
                }
                if previous > *id {
                    return Err(CoreError::UnorderedCatalog { previous, next: *id });
                }
                if previous.next() != Some(*id) {
                    return Err(CoreError::NonContiguousCatalog { previous, next: *id });
                }
            }
        }

        Ok(Self { entries })
    }

    /// The cypherpunk legacy track shipped with the app.
    pub fn cypherpunk_legacy() -> Self {
        Self::from_titles(&[
            "The Genesis of a Movement",
            "The Pillars of a Free Internet",
            "From Mailing List to Mainnet",
            "The Fight for the Future",
            "Cryptographic Foundations",
            "Building the Decentralized Web",
        ])
    }

    /// The Solana coding-challenge track: one Anchor program built up over
    /// ten challenges.
    pub fn solana_challenges() -> Self {
        Self::from_titles(&[
            "The Genesis Program",
            "The First Instruction",
            "State & Accounts",
            "Writing to the Chain",
            "Setting the State",
            "Creating a Custom Instruction",
            "Access Control & Signers",
            "Program Derived Addresses (PDAs)",
            "Handling SOL",
            "Custom Errors",
        ])
    }

    fn from_titles(titles: &[&str]) -> Self {
        Self {
            entries: titles
                .iter()
                .zip(1u32..)
                .map(|(title, id)| (ModuleId::new(id), title.to_string()))
                .collect(),
        }
    }

    /// Fresh module list: first unlocked, the rest locked, none completed.
    pub fn initial_modules(&self) -> Vec<Module> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (id, title))| Module {
                id: *id,
                title: title.clone(),
                is_completed: false,
                is_unlocked: i == 0,
            })
            .collect()
    }

    /// Id of the first module.
    pub fn first_id(&self) -> ModuleId {
        // Construction rejects empty catalogs.
        self.entries[0].0
    }

    /// Whether `id` belongs to this catalog.
    pub fn contains(&self, id: ModuleId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; catalogs are never empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
