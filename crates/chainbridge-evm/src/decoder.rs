//! `EventDecoder`: one event schema, bound once, decoding many logs.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_dyn_abi::Specifier;
use alloy_json_abi::{Event, JsonAbi};
use alloy_primitives::{Log, LogData, B256};
use chainbridge_core::{EventDecodeError, SchemaError};

/// A schema field with its resolved ABI type.
#[derive(Debug, Clone)]
struct BoundField {
    name: String,
    ty: DynSolType,
    indexed: bool,
    /// Byte offset of the field's head word in the data payload.
    /// Unused for indexed fields.
    head_offset: usize,
}

/// One decoded field, in the order the schema declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub name: String,
    pub value: DynSolValue,
    /// `true` if the value came from a topic rather than the data payload.
    pub indexed: bool,
}

/// A fully decoded event. Produced only when every field decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Event name, e.g. "RedeemScheduled"
    pub name: String,
    pub fields: Vec<DecodedField>,
}

impl DecodedEvent {
    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&DynSolValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Values that were read from topics, in declared order.
    pub fn indexed_values(&self) -> impl Iterator<Item = &DecodedField> {
        self.fields.iter().filter(|f| f.indexed)
    }
}

/// Decoder for a single event, bound to its schema at construction.
///
/// The schema is resolved and partitioned once; `decode` only walks the
/// precomputed layout. The decoder is immutable, `Send` and `Sync`.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    name: String,
    signature: String,
    selector: B256,
    anonymous: bool,
    fields: Vec<BoundField>,
    /// Non-indexed field types as one tuple, the layout of the data payload.
    data_layout: DynSolType,
}

impl EventDecoder {
    /// Bind `event_name` from a standard Ethereum ABI JSON document.
    ///
    /// For overloaded events the first declaration wins.
    pub fn from_abi_json(abi_json: &str, event_name: &str) -> Result<Self, SchemaError> {
        let abi: JsonAbi = serde_json::from_str(abi_json).map_err(|e| SchemaError::InvalidAbi {
            reason: e.to_string(),
        })?;
        let event = abi
            .event(event_name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| SchemaError::EventNotFound {
                name: event_name.to_string(),
            })?;
        Self::new(event)
    }

    /// Bind an already-parsed event definition.
    pub fn new(event: &Event) -> Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(event.inputs.len());
        for (i, param) in event.inputs.iter().enumerate() {
            let name = if param.name.is_empty() {
                format!("arg{i}")
            } else {
                param.name.clone()
            };
            let ty: DynSolType = param.resolve().map_err(|e| SchemaError::UnresolvableType {
                param: name.clone(),
                ty: param.ty.clone(),
                reason: e.to_string(),
            })?;
            fields.push(BoundField {
                name,
                ty,
                indexed: param.indexed,
                head_offset: 0,
            });
        }

        let mut head = 0;
        for field in fields.iter_mut().filter(|f| !f.indexed) {
            field.head_offset = head;
            head += 32 * head_words(&field.ty);
        }

        let data_layout = DynSolType::Tuple(
            fields
                .iter()
                .filter(|f| !f.indexed)
                .map(|f| f.ty.clone())
                .collect(),
        );

        let decoder = Self {
            name: event.name.clone(),
            signature: event.signature(),
            selector: event.selector(),
            anonymous: event.anonymous,
            fields,
            data_layout,
        };
        tracing::debug!(
            event = %decoder.name,
            indexed = decoder.indexed_count(),
            data = decoder.fields.len() - decoder.indexed_count(),
            "bound event decoder"
        );
        Ok(decoder)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical signature, e.g. `"Canceled(bytes32)"`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// keccak256 of the signature, the value of topic 0 for this event.
    pub fn selector(&self) -> B256 {
        self.selector
    }

    /// Names of the fields carried in topics, in declared order.
    pub fn indexed_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.indexed)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of the fields carried in the data payload, in declared order.
    pub fn data_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.indexed)
            .map(|f| f.name.as_str())
            .collect()
    }

    fn indexed_count(&self) -> usize {
        self.fields.iter().filter(|f| f.indexed).count()
    }

    /// Index of the first topic holding an indexed field. Topic 0 is the
    /// signature hash unless the event is anonymous.
    fn first_field_topic(&self) -> usize {
        if self.anonymous {
            0
        } else {
            1
        }
    }

    /// Whether topic 0 of `log` is this event's selector.
    pub fn matches(&self, log: &LogData) -> bool {
        !self.anonymous && log.topics().first() == Some(&self.selector)
    }

    /// Decode a full log record.
    pub fn decode_log(&self, log: &Log) -> Result<DecodedEvent, EventDecodeError> {
        self.decode(&log.data)
    }

    /// Decode topics and data against the bound schema.
    ///
    /// The data payload is unpacked first, then the indexed fields are read
    /// from topics in declared order. Topic 0 is never read here; callers
    /// that need to check it use [`matches`](Self::matches).
    pub fn decode(&self, log: &LogData) -> Result<DecodedEvent, EventDecodeError> {
        let data_values = self.decode_data(&log.data)?;
        let topic_values = self.decode_topics(log.topics())?;

        let mut data_values = data_values.into_iter();
        let mut topic_values = topic_values.into_iter();
        let fields = self
            .fields
            .iter()
            .map(|f| {
                let value = if f.indexed {
                    topic_values.next()
                } else {
                    data_values.next()
                };
                value
                    .map(|value| DecodedField {
                        name: f.name.clone(),
                        value,
                        indexed: f.indexed,
                    })
                    .ok_or_else(|| EventDecodeError::DataDecodeFailed {
                        reason: format!("no value decoded for '{}'", f.name),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecodedEvent {
            name: self.name.clone(),
            fields,
        })
    }

    /// Unpack the data payload, rejecting words that are not the canonical
    /// encoding of their declared type.
    fn decode_data(&self, data: &[u8]) -> Result<Vec<DynSolValue>, EventDecodeError> {
        if self.fields.iter().all(|f| f.indexed) {
            return Ok(Vec::new());
        }
        let decoded = self
            .data_layout
            .abi_decode_sequence(data)
            .map_err(|e| EventDecodeError::DataDecodeFailed {
                reason: e.to_string(),
            })?;
        let values = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };

        for (field, value) in self.fields.iter().filter(|f| !f.indexed).zip(&values) {
            let head_ok = data
                .get(field.head_offset..field.head_offset + 32)
                .and_then(|w| <&[u8; 32]>::try_from(w).ok())
                .map_or(true, |word| is_canonical_word(&field.ty, word));
            if !head_ok || !value_in_range(value) {
                return Err(EventDecodeError::DataDecodeFailed {
                    reason: format!(
                        "'{}' is not a valid {} encoding",
                        field.name,
                        field.ty.sol_type_name()
                    ),
                });
            }
        }
        Ok(values)
    }

    fn decode_topics(&self, topics: &[B256]) -> Result<Vec<DynSolValue>, EventDecodeError> {
        let first = self.first_field_topic();
        self.fields
            .iter()
            .filter(|f| f.indexed)
            .enumerate()
            .map(|(i, f)| {
                let index = first + i;
                let topic = topics.get(index).ok_or_else(|| EventDecodeError::MissingTopic {
                    field: f.name.clone(),
                    index,
                    available: topics.len(),
                })?;
                decode_topic(f, topic)
            })
            .collect()
    }
}

/// Decode one indexed value from its 32-byte topic.
///
/// Value types are ABI-encoded in the word directly. Reference types
/// (string, bytes, arrays, tuples) are stored as the keccak256 of their
/// encoding, so the original is unrecoverable and the raw word is returned.
fn decode_topic(field: &BoundField, topic: &B256) -> Result<DynSolValue, EventDecodeError> {
    match field.ty {
        DynSolType::String
        | DynSolType::Bytes
        | DynSolType::Array(_)
        | DynSolType::FixedArray(..)
        | DynSolType::Tuple(_) => Ok(DynSolValue::FixedBytes(*topic, 32)),
        _ if !is_canonical_word(&field.ty, &topic.0) => Err(EventDecodeError::TopicDecodeFailed {
            field: field.name.clone(),
            reason: format!("word is not a valid {} encoding", field.ty.sol_type_name()),
        }),
        _ => field
            .ty
            .abi_decode(topic.as_slice())
            .map_err(|e| EventDecodeError::TopicDecodeFailed {
                field: field.name.clone(),
                reason: e.to_string(),
            }),
    }
}

/// Whether `word` is the only encoding of its value under the single-word
/// type `ty`: padding bytes are zero, or the sign extension for `intN`.
/// Multi-word and dynamic types always pass.
fn is_canonical_word(ty: &DynSolType, word: &[u8; 32]) -> bool {
    let zero = |bytes: &[u8]| bytes.iter().all(|b| *b == 0);
    match *ty {
        DynSolType::Bool => zero(&word[..31]) && word[31] <= 1,
        DynSolType::Address => zero(&word[..12]),
        DynSolType::Function => zero(&word[24..]),
        DynSolType::FixedBytes(size) => zero(&word[size..]),
        DynSolType::Uint(bits) => zero(&word[..32 - bits / 8]),
        DynSolType::Int(bits) => {
            let pad = 32 - bits / 8;
            let fill = if word[pad] & 0x80 == 0 { 0x00 } else { 0xff };
            word[..pad].iter().all(|b| *b == fill)
        }
        _ => true,
    }
}

/// Whether every integer inside `value` fits its declared width.
fn value_in_range(value: &DynSolValue) -> bool {
    match value {
        DynSolValue::Uint(v, bits) => {
            is_canonical_word(&DynSolType::Uint(*bits), &v.to_be_bytes::<32>())
        }
        DynSolValue::Int(v, bits) => {
            is_canonical_word(&DynSolType::Int(*bits), &v.to_be_bytes::<32>())
        }
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            values.iter().all(value_in_range)
        }
        _ => true,
    }
}

fn is_dynamic(ty: &DynSolType) -> bool {
    match ty {
        DynSolType::Bytes | DynSolType::String | DynSolType::Array(_) => true,
        DynSolType::FixedArray(inner, _) => is_dynamic(inner),
        DynSolType::Tuple(types) => types.iter().any(is_dynamic),
        _ => false,
    }
}

/// Words a value of `ty` occupies in the head of an encoded sequence.
fn head_words(ty: &DynSolType) -> usize {
    if is_dynamic(ty) {
        return 1;
    }
    match ty {
        DynSolType::FixedArray(inner, len) => len * head_words(inner),
        DynSolType::Tuple(types) => types.iter().map(head_words).sum(),
        _ => 1,
    }
}
