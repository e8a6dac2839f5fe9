// Raw HID reports exchanged with the board. Only enough of the protocol is understood here to
// find placement payloads; pairing and transport are handled by the host.

use log::{info, trace};

use crate::sensor::PAYLOAD_LEN;


pub const VENDOR_ID: u16 = 0x2d80;
pub const USAGE_PAGE: u16 = 0xFF00;

// Sent once after opening the device to enable continuous placement reports.
pub const INIT_REPORT_ID: u8 = 0x21;
pub const INIT_PAYLOAD: [u8; 2] = [0x01, 0x00];

pub const PLACEMENT_REPORT_ID: u8 = 0x01;
pub const ACK_REPORT_ID: u8 = 0x2a;

// Periodic acknowledgement the board sends under `ACK_REPORT_ID`.
const HEARTBEAT_PREFIX: [u8; 3] = [0x02, 0x64, 0x01];

// Placement reports start with one byte of sub-header before the payload.
const PLACEMENT_SUB_HEADER_LEN: usize = 1;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SensorReport<'a> {
    // Payload bytes, not yet validated.
    Placement(&'a [u8]),
    Heartbeat,
    // Recognized report id, but unexpected content. Logged and ignored.
    UnknownAck(&'a [u8]),
    // Report ids we never expect. Ignored.
    Other { report_id: u8 },
}

pub fn classify_report(report_id: u8, data: &[u8]) -> SensorReport<'_> {
    match report_id {
        PLACEMENT_REPORT_ID => {
            let payload = data.get(PLACEMENT_SUB_HEADER_LEN..).unwrap_or_default();
            // Trailing padding is allowed; a short payload is left for the decoder to reject.
            SensorReport::Placement(&payload[..payload.len().min(PAYLOAD_LEN)])
        }
        ACK_REPORT_ID => {
            if data.starts_with(&HEARTBEAT_PREFIX) {
                trace!("Heartbeat");
                SensorReport::Heartbeat
            } else {
                info!("Detected non-placement report: {:02x?}", data);
                SensorReport::UnknownAck(data)
            }
        }
        _ => {
            trace!("Ignoring report {:#04x}", report_id);
            SensorReport::Other { report_id }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_report_strips_sub_header() {
        let mut data = vec![0x3d];
        data.extend(0..32);
        let SensorReport::Placement(payload) = classify_report(PLACEMENT_REPORT_ID, &data) else {
            panic!("expected placement");
        };
        assert_eq!(payload.len(), 32);
        assert_eq!(payload[0], 0);
        assert_eq!(payload[31], 31);
    }

    #[test]
    fn placement_report_drops_padding() {
        let data = vec![0x3d; 40];
        let SensorReport::Placement(payload) = classify_report(PLACEMENT_REPORT_ID, &data) else {
            panic!("expected placement");
        };
        assert_eq!(payload.len(), 32);
    }

    #[test]
    fn short_placement_report_is_passed_through() {
        assert_eq!(classify_report(PLACEMENT_REPORT_ID, &[0x3d, 1, 2]), SensorReport::Placement(&[
            1, 2
        ]));
        assert_eq!(classify_report(PLACEMENT_REPORT_ID, &[]), SensorReport::Placement(&[]));
    }

    #[test]
    fn acknowledgements() {
        assert_eq!(classify_report(ACK_REPORT_ID, &[0x02, 0x64, 0x01, 0x00]), SensorReport::Heartbeat);
        assert_eq!(
            classify_report(ACK_REPORT_ID, &[0x02, 0x65]),
            SensorReport::UnknownAck(&[0x02, 0x65])
        );
        assert_eq!(classify_report(0x42, &[1, 2, 3]), SensorReport::Other { report_id: 0x42 });
    }
}
