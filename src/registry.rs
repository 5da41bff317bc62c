//! Address lookup over the Behavior register catalogue.

use std::collections::BTreeMap;

use tracing::trace;

use crate::protocol::{Error, Message, Result};
use crate::registers::{CATALOGUE, RawValue, RegisterDescriptor};

/// Descriptors of every register, ordered by address
pub static REGISTERS: &[RegisterDescriptor] = CATALOGUE;

/// Lowest register address of the device
pub const FIRST_ADDRESS: u8 = 32;

/// Highest register address of the device
pub const LAST_ADDRESS: u8 = 122;

const INDEX_LEN: usize = (LAST_ADDRESS - FIRST_ADDRESS) as usize + 1;
const VACANT: u8 = u8::MAX;

static INDEX: [u8; INDEX_LEN] = build_index();

#[allow(clippy::cast_possible_truncation)]
const fn build_index() -> [u8; INDEX_LEN] {
    assert!(CATALOGUE.len() < VACANT as usize);
    let mut index = [VACANT; INDEX_LEN];
    let mut i = 0;
    while i < CATALOGUE.len() {
        let address = CATALOGUE[i].address();
        assert!(address >= FIRST_ADDRESS && address <= LAST_ADDRESS);
        let slot = (address - FIRST_ADDRESS) as usize;
        assert!(index[slot] == VACANT, "duplicate register address");
        index[slot] = i as u8;
        i += 1;
    }
    index
}

/// Descriptor of the register at `address`
#[must_use]
pub fn lookup(address: u8) -> Option<&'static RegisterDescriptor> {
    let slot = address.checked_sub(FIRST_ADDRESS)?;
    match INDEX.get(usize::from(slot)) {
        Some(&i) if i != VACANT => REGISTERS.get(usize::from(i)),
        _ => {
            trace!(address, "no register at address");
            None
        }
    }
}

/// Descriptor of the register a message is addressed to
pub fn descriptor_for(message: &Message) -> Result<&'static RegisterDescriptor> {
    lookup(message.address()).ok_or(Error::UnknownRegister {
        address: message.address(),
    })
}

/// Addresses of every register, ascending
pub fn addresses() -> impl Iterator<Item = u8> {
    REGISTERS.iter().map(RegisterDescriptor::address)
}

/// Check whether the device defines a register at `address`
#[must_use]
pub fn contains(address: u8) -> bool {
    lookup(address).is_some()
}

/// Decode a message against the register it is addressed to
pub fn decode(message: &Message) -> Result<(&'static RegisterDescriptor, RawValue)> {
    let descriptor = descriptor_for(message)?;
    Ok((descriptor, descriptor.decode_raw(message)?))
}

/// Collect messages per register address, keeping arrival order
pub fn group_by_register<I>(messages: I) -> Result<BTreeMap<u8, Vec<Message>>>
where
    I: IntoIterator<Item = Message>,
{
    let mut groups: BTreeMap<u8, Vec<Message>> = BTreeMap::new();
    for message in messages {
        descriptor_for(&message)?;
        groups.entry(message.address()).or_default().push(message);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;
    use crate::registers::{AnalogData, AnalogDataPayload, PortDigitalInput, Register};

    #[test]
    fn test_catalogue_size() {
        assert_eq!(REGISTERS.len(), 67);
        assert_eq!(addresses().count(), 67);
    }

    #[test]
    fn test_addresses_ascending() {
        let addresses: Vec<u8> = addresses().collect();
        assert!(addresses.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(addresses.first(), Some(&FIRST_ADDRESS));
        assert_eq!(addresses.last(), Some(&LAST_ADDRESS));
    }

    #[test]
    fn test_lookup_hits() {
        for descriptor in REGISTERS {
            assert_eq!(lookup(descriptor.address()), Some(descriptor));
        }
        assert_eq!(lookup(70).map(RegisterDescriptor::name), Some("RgbAll"));
    }

    #[test]
    fn test_lookup_gaps() {
        for address in [0, 31, 33, 83, 91, 96, 99, 104, 109, 114, 116, 120, 121, 123, 255] {
            assert!(lookup(address).is_none(), "address {address}");
        }
    }

    #[test]
    fn test_descriptor_for_unknown() {
        let message = Message::read_request(33, crate::PayloadType::U8);
        assert!(matches!(
            descriptor_for(&message),
            Err(Error::UnknownRegister { address: 33 })
        ));
    }

    #[test]
    fn test_dynamic_decode() {
        let message =
            AnalogData::from_payload(MessageType::Event, AnalogDataPayload::new(-100, 200));
        let (descriptor, value) = decode(&message).unwrap();

        assert_eq!(descriptor.name(), "AnalogData");
        assert_eq!(value, RawValue::S16Array(vec![-100, 200]));
    }

    #[test]
    fn test_group_by_register() {
        let messages = vec![
            PortDigitalInput::from_payload(MessageType::Event, crate::DigitalInputs::DI_PORT0),
            AnalogData::from_payload(MessageType::Event, AnalogDataPayload::new(1, 2)),
            PortDigitalInput::from_payload(MessageType::Event, crate::DigitalInputs::empty()),
        ];
        let groups = group_by_register(messages).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&32].len(), 2);
        assert_eq!(groups[&44].len(), 1);
        assert!(PortDigitalInput::get_payload(&groups[&32][1]).unwrap().is_empty());
    }
}
