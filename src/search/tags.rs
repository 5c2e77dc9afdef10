//! Fixed tag catalogue for reviews: mechanics, categories and recommended player counts.
//!
//! Each catalogue is an enum whose discriminant is the bit position used in the
//! `review` table's flag columns. Never reorder variants; append new ones.

use std::fmt;
use std::marker::PhantomData;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A member of a fixed tag catalogue.
pub trait Tag: Copy + Eq + fmt::Debug + 'static {
    /// Every tag in catalogue (and bit) order.
    const ALL: &'static [Self];

    /// Column prefix of the legacy one-boolean-per-tag schema, accepted when parsing.
    const LEGACY_PREFIX: &'static str;

    /// Value emitted in JSON responses.
    type Wire: Serialize;

    fn index(self) -> u32;
    fn slug(self) -> &'static str;
    fn label(self) -> &'static str;
    fn wire(self) -> Self::Wire;

    /// Resolve a tag from its display label, slug, or legacy column name.
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let slug = name.strip_prefix(Self::LEGACY_PREFIX).unwrap_or(name);
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.label() == name || tag.slug() == slug)
    }
}

macro_rules! tag_catalogue {
    (
        $(#[$meta:meta])*
        pub enum $name:ident, legacy_prefix = $prefix:literal {
            $($variant:ident => ($slug:literal, $label:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Tag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];
            const LEGACY_PREFIX: &'static str = $prefix;

            type Wire = &'static str;

            fn index(self) -> u32 {
                self as u32
            }

            fn slug(self) -> &'static str {
                match self {
                    $(Self::$variant => $slug,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn wire(self) -> &'static str {
                self.label()
            }
        }
    };
}

tag_catalogue! {
    /// Game mechanic a reviewer can attach to a game.
    pub enum Mechanic, legacy_prefix = "mech_" {
        AreaControl => ("area_control", "エリア支配"),
        Auction => ("auction", "オークション"),
        Betting => ("betting", "賭け"),
        Drafting => ("drafting", "ドラフト"),
        Cooperative => ("cooperative", "協力"),
        DeckBuilding => ("deck_building", "デッキ/バッグビルド"),
        DiceRolling => ("dice_rolling", "ダイスロール"),
        HiddenRoles => ("hidden_roles", "正体隠匿"),
        ModularBoard => ("modular_board", "モジュラーボード"),
        RouteBuilding => ("route_building", "ルート構築"),
        PushLuck => ("push_luck", "バースト"),
        SetCollection => ("set_collection", "セット収集"),
        Simultaneous => ("simultaneous", "同時手番"),
        TilePlacement => ("tile_placement", "タイル配置"),
        VariablePowers => ("variable_powers", "プレイヤー別能力"),
        WorkerPlacement => ("worker_placement", "ワカプレ"),
    }
}

tag_catalogue! {
    /// Game category a reviewer can attach to a game.
    pub enum Category, legacy_prefix = "cat_" {
        Animals => ("animals", "動物"),
        Bluffing => ("bluffing", "ブラフ"),
        CardGame => ("card_game", "カードゲーム"),
        Childrens => ("childrens", "子供向け"),
        Deduction => ("deduction", "推理"),
        Memory => ("memory", "記憶"),
        Negotiation => ("negotiation", "交渉"),
        Party => ("party", "パーティー"),
        Puzzle => ("puzzle", "パズル"),
        Wargame => ("wargame", "ウォーゲーム"),
        WordGame => ("word_game", "ワードゲーム"),
        Acting => ("acting", "演技"),
        LegacyCampaign => ("legacy_campaign", "レガシー・キャンペーン"),
        PaperPencil => ("paper_pencil", "紙ペン"),
        Solo => ("solo", "ソロ向き"),
        TrickTaking => ("trick_taking", "トリテ"),
        Pair => ("pair", "ペア向き"),
        LargeGroup => ("large_group", "多人数向き"),
    }
}

/// Player count a reviewer recommends for a game.
///
/// The open-ended bucket is reported as the sentinel count `7`, so a request for
/// "8 players" never matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendedPlayers {
    Two,
    Three,
    Four,
    Five,
    SixPlus,
}

impl RecommendedPlayers {
    pub const SIX_PLUS_SENTINEL: u8 = 7;

    /// Look up the bucket reported as `count`.
    #[must_use]
    pub fn from_count(count: i32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|bucket| i32::from(bucket.count()) == count)
    }

    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::SixPlus => Self::SIX_PLUS_SENTINEL,
        }
    }
}

impl Tag for RecommendedPlayers {
    const ALL: &'static [Self] = &[
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::SixPlus,
    ];
    const LEGACY_PREFIX: &'static str = "rec_players_";

    type Wire = u8;

    fn index(self) -> u32 {
        self as u32
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::SixPlus => "6plus",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Two => "2人",
            Self::Three => "3人",
            Self::Four => "4人",
            Self::Five => "5人",
            Self::SixPlus => "6人以上",
        }
    }

    fn wire(self) -> u8 {
        self.count()
    }
}

/// A set of tags from one catalogue, stored as a bitmask.
pub struct TagSet<T> {
    bits: u32,
    _tag: PhantomData<T>,
}

impl<T: Tag> TagSet<T> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _tag: PhantomData,
        }
    }

    /// Mask covering every tag in the catalogue.
    fn valid_mask() -> u32 {
        T::ALL.iter().fold(0, |mask, tag| mask | (1 << tag.index()))
    }

    /// Build a set from raw bits, dropping bits outside the catalogue.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & Self::valid_mask(),
            _tag: PhantomData,
        }
    }

    /// Decode a flag column value.
    #[must_use]
    pub fn from_column(value: i32) -> Self {
        Self::from_bits(u32::from_ne_bytes(value.to_ne_bytes()))
    }

    /// Encode as a flag column value.
    #[must_use]
    pub fn to_column(self) -> i32 {
        i32::from_ne_bytes(self.bits.to_ne_bytes())
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    pub fn insert(&mut self, tag: T) {
        self.bits |= 1 << tag.index();
    }

    #[must_use]
    pub fn contains(self, tag: T) -> bool {
        self.bits & (1 << tag.index()) != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            _tag: PhantomData,
        }
    }

    /// True when every tag of `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.bits.count_ones()
    }

    /// Iterate members in catalogue order.
    pub fn iter(self) -> impl Iterator<Item = T> {
        T::ALL.iter().copied().filter(move |tag| self.contains(*tag))
    }
}

impl<T> Clone for TagSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TagSet<T> {}

impl<T> PartialEq for TagSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for TagSet<T> {}

impl<T: Tag> Default for TagSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Tag> fmt::Debug for TagSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Tag> FromIterator<T> for TagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<T: Tag> Serialize for TagSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::try_from(self.len()).unwrap_or_default();
        let mut seq = serializer.serialize_seq(Some(len))?;
        for tag in self.iter() {
            seq.serialize_element(&tag.wire())?;
        }
        seq.end()
    }
}
