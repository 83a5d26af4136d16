//! Full loop: the on-target writer produces a report (storage image and
//! console hex echo), the offline decoder reconstructs it from either.

#![allow(clippy::unwrap_used)]

use blackbox_decoder::{IdTable, decode_report, decode_trace, parse_hex_dump};
use blackbox_fault::{FaultClass, FaultRecord, ReportWriter};
use blackbox_hal::{ExceptionFrame, SystemRegisters, WriteGrain};
use blackbox_test_helpers::{CaptureConsole, MemStorage};
use blackbox_trace::{TraceArg, TraceLog};

const ID_TICK: u8 = 0x01;
const ID_SENSOR: u8 = 0x20;
const ID_STATE: u8 = 0x21;

fn id_table() -> IdTable {
    let mut table = IdTable::new();
    table.insert(ID_TICK, "time.tick", &[4]).unwrap();
    table.insert(ID_SENSOR, "sensor.sample", &[2, 1]).unwrap();
    table.insert(ID_STATE, "app.state", &[1]).unwrap();
    table
}

fn fault_record() -> FaultRecord {
    FaultRecord {
        class: FaultClass::Exception,
        param: 3,
        frame: ExceptionFrame {
            return_addr: 0x0800_1000,
            xpsr: 0x0100_0000,
            ..ExceptionFrame::zeroed()
        },
        sp: 0x2000_7000,
        lr: 0xffff_fffd,
        regs: SystemRegisters { cfsr: 0x0400, ..SystemRegisters::default() },
        uptime_ms: 90_001,
    }
}

#[test]
fn storage_image_round_trips_records() {
    let log: TraceLog<32> = TraceLog::new();
    log.record(ID_TICK, &[TraceArg::u32(90_000)]).unwrap();
    log.record(ID_SENSOR, &[TraceArg::u16(0x1234), TraceArg::u8(9)]).unwrap();
    log.record(ID_STATE, &[TraceArg::u8(4)]).unwrap();
    let snap = log.snapshot();

    let mut storage = MemStorage::new(WriteGrain::Bytes8, 4096);
    let mut console = CaptureConsole::new();
    let summary = ReportWriter::new(WriteGrain::Bytes8).write(
        &mut storage,
        &mut console,
        &fault_record(),
        snap.cursor(),
        snap.bytes(),
    );
    assert!(summary.persisted());

    let report = decode_report(storage.contents()).unwrap();
    assert_eq!(report.fault.class, "exception");
    assert_eq!(report.fault.return_addr, 0x0800_1000);
    assert_eq!(report.fault.uptime_ms, 90_001);
    assert_eq!(report.trace.cursor, snap.cursor());
    assert_eq!(report.trace.bytes.as_slice(), snap.bytes());

    let decoded = decode_trace(&id_table(), &report.trace);
    assert_eq!(decoded.unknown_bytes, 0);
    let names: Vec<&str> = decoded.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["time.tick", "sensor.sample", "app.state"]);
    assert_eq!(decoded.records[0].args, vec![90_000]);
    assert_eq!(decoded.records[1].args, vec![0x1234, 9]);
}

#[test]
fn console_dump_yields_the_same_image_as_storage() {
    let log: TraceLog<16> = TraceLog::new();
    log.record(ID_STATE, &[TraceArg::u8(1)]).unwrap();
    let snap = log.snapshot();

    let mut storage = MemStorage::new(WriteGrain::Bytes16, 4096);
    let mut console = CaptureConsole::new();
    let _ = ReportWriter::new(WriteGrain::Bytes16).write(
        &mut storage,
        &mut console,
        &fault_record(),
        snap.cursor(),
        snap.bytes(),
    );

    let from_console = parse_hex_dump(console.as_text()).unwrap();
    assert_eq!(from_console.as_slice(), storage.contents());
    assert_eq!(
        decode_report(&from_console).unwrap(),
        decode_report(storage.contents()).unwrap()
    );
}

#[test]
fn wrapped_ring_still_yields_the_recent_records() {
    let log: TraceLog<18> = TraceLog::new();
    // 4 bytes per sensor record; 8 records = 32 bytes wrap the 18-byte
    // ring, tearing one record across the cursor.
    for i in 0..8_u16 {
        log.record(ID_SENSOR, &[TraceArg::u16(i), TraceArg::u8(i as u8)]).unwrap();
    }
    let snap = log.snapshot();

    let mut storage = MemStorage::new(WriteGrain::Bytes8, 4096);
    let mut console = CaptureConsole::new();
    let _ = ReportWriter::new(WriteGrain::Bytes8).write(
        &mut storage,
        &mut console,
        &fault_record(),
        snap.cursor(),
        snap.bytes(),
    );

    let report = decode_report(storage.contents()).unwrap();
    let decoded = decode_trace(&id_table(), &report.trace);
    // The ring holds the last four complete records; the torn one at
    // the wrap is skipped by the alignment search.
    assert_eq!(decoded.records.len(), 4);
    let last = decoded.records.last().unwrap();
    assert_eq!(last.args, vec![7, 7]);
    assert_eq!(decoded.unknown_bytes, 0);
}

#[test]
fn second_fault_survives_only_on_the_console() {
    let mut storage = MemStorage::new(WriteGrain::Bytes8, 4096);
    let writer = ReportWriter::new(WriteGrain::Bytes8);

    let mut first_console = CaptureConsole::new();
    let _ = writer.write(&mut storage, &mut first_console, &fault_record(), 0, &[0x11; 8]);

    let mut second = fault_record();
    second.param = 42;
    let mut second_console = CaptureConsole::new();
    let _ = writer.write(&mut storage, &mut second_console, &second, 0, &[0x22; 8]);

    let stored = decode_report(storage.contents()).unwrap();
    assert_eq!(stored.fault.param, 3, "slot keeps the first fault");

    let echoed = parse_hex_dump(second_console.as_text()).unwrap();
    let from_echo = decode_report(&echoed).unwrap();
    assert_eq!(from_echo.fault.param, 42, "console carries the second");
    assert_eq!(from_echo.trace.bytes, vec![0x22; 8]);
}
