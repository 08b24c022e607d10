#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

mod board;

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::board::{DynOutput, Inputs, MatrixDisplay, Trigger};
    use chess_clock::encoder::{Encoder, RangeMode, RotaryEncoder};
    use chess_clock::{ChessClock, Config, Event, IdleStep, Player};
    use cortex_m::delay::Delay;
    use embedded_hal::digital::v2::OutputPin;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        gpio::{bank0::Gpio10, FunctionSioOutput, Pin, PullDown},
        sio::Sio,
        timer::Timer,
        watchdog::Watchdog,
    };

    type Buzzer = Pin<Gpio10, FunctionSioOutput, PullDown>;
    type Game = ChessClock<MatrixDisplay, DynOutput, RotaryEncoder, Buzzer>;

    // Shared between the idle loop and the pin interrupt
    #[shared]
    struct Shared {
        clock: Game,
    }

    #[local]
    struct Local {
        inputs: Inputs,
        irq_timer: Timer,
        idle_timer: Timer,
        delay: Delay,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("chess clock starting");
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let delay = Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let config = Config::default().validate().ok().unwrap();

        let display_1 = MatrixDisplay::new(
            pins.gpio4.into_push_pull_output().into_dyn_pin(),
            pins.gpio5.into_push_pull_output().into_dyn_pin(),
            pins.gpio16.into_push_pull_output().into_dyn_pin(),
        );
        let display_2 = MatrixDisplay::new(
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio17.into_push_pull_output().into_dyn_pin(),
        );
        let led_1 = pins.gpio8.into_push_pull_output().into_dyn_pin();
        let led_2 = pins.gpio9.into_push_pull_output().into_dyn_pin();
        let players = [
            Player::new(display_1, led_1, &config),
            Player::new(display_2, led_2, &config),
        ];

        let mut buzzer = pins.gpio10.into_push_pull_output();
        buzzer.set_low().ok();

        let encoder = RotaryEncoder::new(
            config.encoder_min,
            config.encoder_max,
            RangeMode::Wrap,
            config.encoder_reversed,
        );

        let clock = ChessClock::new(config, players, encoder, buzzer, now_ms(&timer));

        let mut inputs = Inputs {
            player_1: pins.gpio2.into_pull_down_input(),
            player_2: pins.gpio3.into_pull_down_input(),
            settings: pins.gpio11.into_pull_down_input(),
            reset: pins.gpio14.into_pull_down_input(),
            encoder_dt: pins.gpio12.into_pull_up_input(),
            encoder_clk: pins.gpio13.into_pull_up_input(),
        };
        inputs.enable_interrupts();

        (
            Shared { clock },
            Local {
                inputs,
                irq_timer: timer,
                idle_timer: timer,
                delay,
            },
            init::Monotonics(),
        )
    }

    // Countdown and setup flashing. The lock is taken per pass, so a flag
    // fall and its alert finish before any queued pin interrupt runs.
    #[idle(shared = [clock], local = [idle_timer, delay])]
    fn idle(mut ctx: idle::Context) -> ! {
        let delay = ctx.local.delay;
        let timer = ctx.local.idle_timer;
        loop {
            // Read the counter under the lock so it is never older than an
            // activation made by the pin task.
            let step = ctx
                .shared
                .clock
                .lock(|clock| clock.update(now_ms(timer), &mut *delay));
            if let IdleStep::Sleep(ms) = step {
                delay.delay_ms(ms);
            }
        }
    }

    // Hardware Task: GPIO Interrupt (buttons and encoder)
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [clock], local = [inputs, irq_timer])]
    fn pin_event(mut ctx: pin_event::Context) {
        let now = now_ms(ctx.local.irq_timer);

        for trigger in ctx.local.inputs.drain() {
            ctx.shared.clock.lock(|clock| match trigger {
                Trigger::Event(event) => {
                    defmt::debug!("{} at {=u32}", event, now);
                    clock.handle(event, now);
                }
                Trigger::Encoder { clk, dt } => {
                    if clock.encoder_mut().update(clk, dt) {
                        let value = clock.encoder().read();
                        clock.handle(Event::EncoderChanged(value), now);
                    }
                }
            });
        }
    }

    /// Milliseconds since boot, wrapping after ~49 days.
    fn now_ms(timer: &Timer) -> u32 {
        (timer.get_counter().ticks() / 1_000) as u32
    }
}
