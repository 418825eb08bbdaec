mod tests {
    use embassy_time::Duration;
    use embedded_hal::delay::DelayNs;
    use smartled_encoder::color::{Rgb, luma8};
    use smartled_encoder::error::StripError;
    use smartled_encoder::loopback::{CaptureOverflow, LoopbackChannel, NoopDelay};
    use smartled_encoder::strip::{LedStrip, StripConfig};
    use smartled_encoder::symbol::{DEFAULT_RESOLUTION_HZ, SymbolSet, SymbolTable};
    use smartled_encoder::timing::ChipVariant;
    use smartled_encoder::{ChannelState, Encoder, PulseChannel, frame_symbols};

    /// Channel whose transmission never finishes
    #[derive(Debug, Default)]
    struct StuckChannel;

    impl PulseChannel for StuckChannel {
        type Error = core::convert::Infallible;

        fn enable(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transmit(
            &mut self,
            _encoder: &mut dyn Encoder,
            _data: &[u8],
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        fn wait_done(&mut self, _timeout: Duration) -> Result<ChannelState, Self::Error> {
            Ok(ChannelState::Busy)
        }

        fn disable(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Failure raised by [`FaultyChannel::disable`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct DisableFault;

    /// Channel that accepts frames but refuses to shut down
    #[derive(Debug, Default)]
    struct FaultyChannel {
        enabled: bool,
    }

    impl PulseChannel for FaultyChannel {
        type Error = DisableFault;

        fn enable(&mut self) -> Result<(), Self::Error> {
            self.enabled = true;
            Ok(())
        }

        fn transmit(
            &mut self,
            _encoder: &mut dyn Encoder,
            _data: &[u8],
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        fn wait_done(&mut self, _timeout: Duration) -> Result<ChannelState, Self::Error> {
            Ok(ChannelState::Idle)
        }

        fn disable(&mut self) -> Result<(), Self::Error> {
            Err(DisableFault)
        }
    }

    /// Delay provider that records what it was asked to sleep
    #[derive(Debug, Default)]
    struct RecordingDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn ws2812_set() -> SymbolSet {
        SymbolSet::compile(ChipVariant::Ws2812.profile(), DEFAULT_RESOLUTION_HZ)
    }

    #[test]
    fn test_flush_emits_frame_waveform() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 2);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 6> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        strip.set_pixel(0, Rgb::new(0, 0, 0)).unwrap();
        strip.set_pixel(1, Rgb::new(0, 255, 0)).unwrap();
        assert_eq!(strip.as_bytes(), &[0, 0, 0, 255, 0, 0]);
        strip.flush().unwrap();

        let (channel, _delay) = strip.free().unwrap();
        let set = ws2812_set();
        let captured = channel.captured();
        assert_eq!(captured.len(), frame_symbols(6));
        // First byte is 0x00, so eight 0-bit symbols
        assert_eq!(captured[..8], [set.bit0; 8]);
        // Fourth byte is 0xFF
        assert_eq!(captured[24..32], [set.bit1; 8]);
        assert_eq!(captured[48], set.reset);
    }

    #[test]
    fn test_flush_resumes_over_small_slots() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 2);
        let wide: LoopbackChannel<64> = LoopbackChannel::new();
        let narrow: LoopbackChannel<64> = LoopbackChannel::with_slot(3);

        let mut reference: LedStrip<_, _, 6> =
            LedStrip::new(wide, NoopDelay, &table, &config).unwrap();
        let mut chunked: LedStrip<_, _, 6> =
            LedStrip::new(narrow, NoopDelay, &table, &config).unwrap();
        for strip in [&mut reference, &mut chunked] {
            strip.set_pixels(0, &[Rgb::new(1, 2, 3), Rgb::new(250, 128, 7)]).unwrap();
            strip.flush().unwrap();
        }

        let (wide, _) = reference.free().unwrap();
        let (narrow, _) = chunked.free().unwrap();
        assert_eq!(wide.captured(), narrow.captured());
    }

    #[test]
    fn test_consecutive_frames_append() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 3> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        strip.set_pixel(0, Rgb::new(255, 0, 0)).unwrap();
        strip.flush().unwrap();
        strip.set_pixel(0, Rgb::new(0, 0, 255)).unwrap();
        strip.flush().unwrap();

        let (channel, _) = strip.free().unwrap();
        assert_eq!(channel.frames(), 2);
        assert_eq!(channel.captured().len(), 2 * frame_symbols(3));
    }

    #[test]
    fn test_rgbw_frame_layout_and_length() {
        let table = SymbolTable::default();
        let mut config = StripConfig::new(ChipVariant::Sk6812, 1);
        config.white = Some(luma8);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 4> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        strip.set_pixel(0, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(strip.as_bytes(), &[20, 10, 30, luma8(Rgb::new(10, 20, 30))]);
        assert_eq!(strip.frame_symbols(), frame_symbols(4));
        strip.flush().unwrap();

        let (channel, _) = strip.free().unwrap();
        assert_eq!(channel.captured().len(), 33);
    }

    #[test]
    fn test_busy_and_wait_on_idle_channel() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 3> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        assert_eq!(strip.busy(), Ok(false));
        // A zero timeout makes wait a poll, agreeing with busy.
        assert_eq!(strip.wait(Duration::from_ticks(0)), Ok(()));
        assert_eq!(strip.wait(Duration::from_millis(5)), Ok(()));
    }

    #[test]
    fn test_busy_channel_times_out() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let mut strip: LedStrip<_, _, 3> =
            LedStrip::new(StuckChannel, NoopDelay, &table, &config).unwrap();

        assert_eq!(strip.busy(), Ok(true));
        assert_eq!(strip.wait(Duration::from_ticks(0)), Err(StripError::Timeout));
        assert_eq!(strip.wait(Duration::from_millis(5)), Err(StripError::Timeout));
        // Flush waits out the previous frame first, so it hits the same wall.
        assert_eq!(strip.flush(), Err(StripError::Timeout));
    }

    #[test]
    fn test_channel_fault_surfaces() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 2);
        // Room for 8 symbols cannot hold a 49-symbol frame.
        let channel: LoopbackChannel<8> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 6> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        assert_eq!(
            strip.flush(),
            Err(StripError::Channel(CaptureOverflow))
        );
    }

    #[test]
    fn test_pixel_ops_validate_through_strip() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 3);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 9> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        assert_eq!(strip.length(), 3);
        assert_eq!(
            strip.set_pixel(3, Rgb::new(1, 1, 1)),
            Err(StripError::OutOfRange)
        );
        assert_eq!(
            strip.fill(2, 2, Rgb::new(1, 1, 1)),
            Err(StripError::OutOfRange)
        );
        assert_eq!(strip.set_pixels(0, &[]), Err(StripError::InvalidArgument));
        strip.fill(0, 3, Rgb::new(5, 5, 5)).unwrap();
        assert_eq!(strip.as_bytes(), &[5, 5, 5, 5, 5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_construction_errors() {
        let table = SymbolTable::default();
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let undersized = LedStrip::<_, _, 5>::new(
            channel,
            NoopDelay,
            &table,
            &StripConfig::new(ChipVariant::Ws2812, 2),
        );
        assert_eq!(undersized.err(), Some(StripError::OutOfMemory));

        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let empty = LedStrip::<_, _, 5>::new(
            channel,
            NoopDelay,
            &table,
            &StripConfig::new(ChipVariant::Ws2812, 0),
        );
        assert_eq!(empty.err(), Some(StripError::InvalidArgument));
    }

    #[test]
    fn test_free_returns_peripherals() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let strip: LedStrip<_, _, 3> =
            LedStrip::new(channel, NoopDelay, &table, &config).unwrap();

        let (channel, _delay) = strip.free().unwrap();
        assert!(!channel.is_enabled());
    }

    #[test]
    fn test_free_keeps_peripherals_on_disable_failure() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let strip: LedStrip<_, _, 3> =
            LedStrip::new(FaultyChannel::default(), NoopDelay, &table, &config).unwrap();

        let (e, channel, _delay) = strip.free().unwrap_err();
        assert_eq!(e, StripError::Channel(DisableFault));
        // The channel comes back in the state the failed disable left it.
        assert!(channel.enabled);
    }

    #[test]
    fn test_interframe_pause_goes_through_delay() {
        let table = SymbolTable::default();
        let config = StripConfig::new(ChipVariant::Ws2812, 1);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 3> =
            LedStrip::new(channel, RecordingDelay::default(), &table, &config).unwrap();
        strip.flush().unwrap();
        let (_, delay) = strip.free().unwrap();
        assert_eq!(delay.total_ns, 50_000);

        let mut config = StripConfig::new(ChipVariant::Ws2812, 1);
        config.interframe_pause = Duration::from_micros(0);
        let channel: LoopbackChannel<64> = LoopbackChannel::new();
        let mut strip: LedStrip<_, _, 3> =
            LedStrip::new(channel, RecordingDelay::default(), &table, &config).unwrap();
        strip.flush().unwrap();
        let (_, delay) = strip.free().unwrap();
        assert_eq!(delay.calls, 0);
    }
}
