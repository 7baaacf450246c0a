use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Suspect = 0,
    Weapon = 1,
    Room = 2,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Category::Suspect),
            1 => Some(Category::Weapon),
            2 => Some(Category::Room),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of cards the catalog holds for this category.
    pub const fn len(self) -> usize {
        match self {
            Category::Suspect => 6,
            Category::Weapon => 6,
            Category::Room => 9,
        }
    }

    /// Catalog index of the first card in this category.
    pub const fn first_id(self) -> u8 {
        match self {
            Category::Suspect => 0,
            Category::Weapon => 6,
            Category::Room => 12,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Suspect => "suspect",
            Category::Weapon => "weapon",
            Category::Room => "room",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn categories_cover_the_catalog_without_gaps() {
        let mut next = 0u8;
        for category in Category::ALL {
            assert_eq!(category.first_id(), next);
            next += category.len() as u8;
        }
        assert_eq!(next, 21);
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Category::from_index(1), Some(Category::Weapon));
        assert_eq!(Category::from_index(3), None);
    }
}
