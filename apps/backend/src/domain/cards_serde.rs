//! Serialization and deserialization for card types

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("Invalid suit: {s}")))
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("Invalid rank: {s}")))
    }
}

// Card serde: `{"id": "10_spades", "rank": "10", "suit": "spades"}`
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Card", 3)?;
        st.serialize_field("id", &self.id())?;
        st.serialize_field("rank", &self.rank)?;
        st.serialize_field("suit", &self.suit)?;
        st.end()
    }
}

#[derive(Deserialize)]
struct CardRepr {
    #[serde(default)]
    id: Option<String>,
    rank: Rank,
    suit: Suit,
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CardRepr::deserialize(deserializer)?;
        let card = Card::new(repr.rank, repr.suit);
        match repr.id {
            Some(id) if !card.has_id(&id) => Err(D::Error::custom(format!(
                "Card id {id} does not match rank/suit {card}"
            ))),
            _ => Ok(card),
        }
    }
}
