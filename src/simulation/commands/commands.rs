use crate::systems::thermal;

use super::SimulationCore;

pub(super) fn start_charging(core: &mut SimulationCore) {
    thermal::start_charging(&mut core.state, &core.config);
}

pub(super) fn start_discharging(core: &mut SimulationCore) {
    if !thermal::start_discharging(&mut core.state) {
        return;
    }

    // Jump start the airflow so the pipes are not empty when the fan spins up
    core.pool.reset_all(&core.layout, core.config.room_temperature, &mut core.rng);
}

pub(super) fn stop(core: &mut SimulationCore) {
    thermal::stop(&mut core.state, &core.config);
}
