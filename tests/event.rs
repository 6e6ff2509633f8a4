mod tests {
    use headlamp_core::{BatteryBand, Event, EventChannel, LightState};

    #[test]
    fn test_events_are_received_in_order() {
        let events = EventChannel::new();
        let sender = events.sender();
        let receiver = events.receiver();

        sender.emit(Event::DefaultsWritten);
        sender.emit(Event::BatteryBand(BatteryBand::Medium));
        sender.emit(Event::StateChanged(LightState::Profile(2)));

        assert_eq!(events.len(), 3);
        assert_eq!(receiver.try_receive(), Ok(Event::DefaultsWritten));
        assert_eq!(receiver.try_receive(), Ok(Event::BatteryBand(BatteryBand::Medium)));
        assert_eq!(
            receiver.try_receive(),
            Ok(Event::StateChanged(LightState::Profile(2)))
        );
        assert!(receiver.try_receive().is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_queue_rejects_send() {
        let events = EventChannel::new();
        let sender = events.sender();

        for _ in 0..16 {
            assert!(sender.try_send(Event::ThermalWarning).is_ok());
        }
        let rejected = sender.try_send(Event::ThermalShutoff);
        assert_eq!(rejected.map_err(|err| err.0), Err(Event::ThermalShutoff));
        assert_eq!(events.len(), 16);
    }

    #[test]
    fn test_emit_drops_when_full() {
        let events = EventChannel::new();
        let sender = events.sender();

        for _ in 0..20 {
            sender.emit(Event::ThermalWarning);
        }
        sender.emit(Event::UndervoltageShutoff);

        assert_eq!(events.len(), 16);
        let receiver = events.receiver();
        let drained: Vec<Event> = std::iter::from_fn(|| receiver.try_receive().ok()).collect();
        assert!(drained.iter().all(|event| *event == Event::ThermalWarning));
    }
}
