mod common;

mod tests {
    use myrtio_ble_light::channel::MailboxFull;
    use myrtio_ble_light::config::ADVERTISING_RESTART_DELAY;
    use myrtio_ble_light::config::profile::{
        BRIGHTNESS_CHARACTERISTIC_UUID, COLOR_CHARACTERISTIC_UUID,
    };
    use myrtio_ble_light::{
        BrightnessRecord, Characteristic, ColorRecord, Duration, EventMailbox, EventProcessor,
        Instant, LightEvent, OutputLevels, Rgb, TickScheduler,
    };

    use super::common::engine_with;

    fn color_event(r: u8, g: u8, b: u8) -> LightEvent {
        LightEvent::ColorWritten(ColorRecord { r, g, b })
    }

    #[test]
    fn test_mailbox_rejects_when_full() {
        let mailbox: EventMailbox<2> = EventMailbox::new();
        let poster = mailbox.poster();
        assert_eq!(poster.try_post(LightEvent::Connected), Ok(()));
        assert_eq!(poster.try_post(color_event(1, 2, 3)), Ok(()));
        assert_eq!(
            poster.try_post(LightEvent::Disconnected),
            Err(MailboxFull(LightEvent::Disconnected))
        );
        assert_eq!(mailbox.len(), 2);

        assert_eq!(mailbox.try_take(), Some(LightEvent::Connected));
        assert_eq!(mailbox.try_take(), Some(color_event(1, 2, 3)));
        assert_eq!(mailbox.try_take(), None);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_event_from_write() {
        assert_eq!(
            LightEvent::from_write(Characteristic::Color, &[200, 0, 255]),
            Some(color_event(200, 0, 255))
        );
        assert_eq!(LightEvent::from_write(Characteristic::Color, &[200, 0]), None);
        assert_eq!(
            LightEvent::from_write(Characteristic::Brightness, &[150, 0]),
            Some(LightEvent::BrightnessWritten(BrightnessRecord(150)))
        );
        assert_eq!(LightEvent::from_write(Characteristic::Brightness, &[]), None);
    }

    #[test]
    fn test_characteristic_uuid() {
        assert_eq!(
            Characteristic::from_uuid(COLOR_CHARACTERISTIC_UUID),
            Some(Characteristic::Color)
        );
        assert_eq!(
            Characteristic::from_uuid(&BRIGHTNESS_CHARACTERISTIC_UUID.to_uppercase()),
            Some(Characteristic::Brightness)
        );
        assert_eq!(Characteristic::from_uuid("not-a-uuid"), None);
    }

    #[test]
    fn test_process_pending_applies_writes() {
        let mailbox: EventMailbox<4> = EventMailbox::new();
        let mut processor = EventProcessor::new(&mailbox);
        let mut engine = engine_with(Rgb::new(10, 10, 10), 50);

        mailbox.try_post(color_event(200, 0, 0)).unwrap();
        mailbox
            .try_post(LightEvent::BrightnessWritten(BrightnessRecord(80)))
            .unwrap();

        let effects = processor.process_pending(&mut engine);
        assert!(!effects.has_effects());
        assert!(mailbox.is_empty());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.target, Rgb::new(200, 0, 0));
        assert!(snapshot.in_transition);
        assert_eq!(engine.driver().last_frame(), Some(OutputLevels::new(8, 8, 8)));
    }

    #[test]
    fn test_connection_tracking() {
        let mailbox: EventMailbox<4> = EventMailbox::new();
        let mut processor = EventProcessor::new(&mailbox);
        let mut engine = engine_with(Rgb::new(0, 0, 0), 100);
        assert!(!processor.is_connected());

        mailbox.try_post(LightEvent::Connected).unwrap();
        let effects = processor.process_pending(&mut engine);
        assert!(processor.is_connected());
        assert_eq!(effects.restart_advertising, Some(Duration::from_millis(0)));

        mailbox.try_post(LightEvent::Disconnected).unwrap();
        let effects = processor.process_pending(&mut engine);
        assert!(!processor.is_connected());
        assert_eq!(effects.restart_advertising, Some(ADVERTISING_RESTART_DELAY));

        // Already disconnected, nothing to restart
        mailbox.try_post(LightEvent::Disconnected).unwrap();
        let effects = processor.process_pending(&mut engine);
        assert!(!effects.has_effects());
    }

    #[test]
    fn test_scheduler_timing() {
        let mailbox: EventMailbox<4> = EventMailbox::new();
        let engine = engine_with(Rgb::new(0, 0, 0), 100);
        let mut scheduler = TickScheduler::new(engine, &mailbox);

        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1050));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        let result = scheduler.tick(Instant::from_millis(1060));
        assert_eq!(result.next_deadline, Instant::from_millis(1100));
        assert_eq!(result.sleep_duration, Duration::from_millis(40));

        // Long stall: backlog is dropped
        let result = scheduler.tick(Instant::from_millis(5000));
        assert_eq!(result.next_deadline, Instant::from_millis(5050));
    }

    #[test]
    fn test_scheduler_gates_on_connection() {
        let mailbox: EventMailbox<4> = EventMailbox::new();
        let engine = engine_with(Rgb::new(0, 0, 0), 100);
        let mut scheduler = TickScheduler::new(engine, &mailbox);

        mailbox.try_post(color_event(255, 0, 0)).unwrap();
        scheduler.tick(Instant::from_millis(0));
        assert!(scheduler.engine().snapshot().in_transition);
        assert_eq!(scheduler.engine().snapshot().progress, 0.0);
        assert!(scheduler.engine().driver().calls.is_empty());

        mailbox.try_post(LightEvent::Connected).unwrap();
        let result = scheduler.tick(Instant::from_millis(50));
        assert!(result.effects.has_effects());
        assert!(scheduler.is_connected());
        assert_eq!(scheduler.engine().snapshot().progress, 0.01);
        assert_eq!(
            scheduler.engine().driver().last_frame(),
            Some(OutputLevels::new(0, 0, 0))
        );

        let mut now = 100;
        while scheduler.engine().snapshot().in_transition {
            scheduler.tick(Instant::from_millis(now));
            now += 50;
            assert!(now < 100 * 50 + 100);
        }
        assert_eq!(scheduler.engine().snapshot().current, Rgb::new(255, 0, 0));
    }
}
